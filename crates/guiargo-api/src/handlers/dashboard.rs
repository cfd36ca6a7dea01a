//! Dashboard (`/` and `/dashboard`)

use axum::{extract::State, response::Response};
use tower_cookies::Cookies;
use tracing::error;

use super::page::{self, Escalate};
use crate::extract::CurrentUser;
use crate::state::AppState;
use crate::views::{DashboardPage, Section};

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Dashboard, Escalate::All).await;
    let today = page::today();

    let page = match state.dashboard.overview(&user, today).await {
        Ok(overview) => DashboardPage::new(chrome, overview.stats, &overview.events, today),
        Err(e) => {
            error!("Failed to load dashboard for {}: {}", user.username, e);
            chrome.fail("Error al cargar el dashboard");
            DashboardPage::new(chrome, Default::default(), &[], today)
        }
    };

    state.views.render("dashboard", &page)
}
