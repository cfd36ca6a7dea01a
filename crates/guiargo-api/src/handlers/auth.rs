// ============================================================================
// Guiargo API - Auth Handlers
// File: crates/guiargo-api/src/handlers/auth.rs
// ============================================================================
//! Login form, session cookie issue and logout

use axum::{extract::State, response::Response, Form};
use tower_cookies::cookie::{time::Duration, SameSite};
use tower_cookies::{Cookie, Cookies};
use tracing::{info, warn};

use guiargo_shared::constants::{HOME_PATH, LOGIN_PATH, SESSION_COOKIE};

use super::found;
use crate::forms::LoginForm;
use crate::state::AppState;
use crate::views::LoginPage;

fn login_page(state: &AppState, username: String, error: Option<String>) -> Response {
    state.views.render(
        "login",
        &LoginPage { app_name: state.config.app.name.clone(), username, error },
    )
}

/// GET /login
pub async fn login_form(State(state): State<AppState>, cookies: Cookies) -> Response {
    if let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) {
        if state.auth.authenticate(&token).await.is_ok() {
            return found(HOME_PATH);
        }
    }
    login_page(&state, String::new(), None)
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.auth.login(&form.username, &form.password).await {
        Ok(result) => {
            let max_age = state.auth.session_max_age_seconds();
            cookies.add(
                Cookie::build((SESSION_COOKIE, result.session_token))
                    .path("/")
                    .http_only(true)
                    .secure(state.secure_cookies())
                    .same_site(SameSite::Lax)
                    .max_age(Duration::seconds(max_age))
                    .build(),
            );
            info!("User {} signed in", result.context.username);
            found(HOME_PATH)
        }
        Err(e) => {
            warn!("Rejected login for '{}': {}", form.username.trim(), e);
            login_page(&state, form.username.trim().to_string(), Some(e.flash_message("Error en el servidor")))
        }
    }
}

/// GET /logout
pub async fn logout(cookies: Cookies) -> Response {
    cookies.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    found(LOGIN_PATH)
}
