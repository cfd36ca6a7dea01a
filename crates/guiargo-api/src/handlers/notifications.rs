//! `/notificaciones` page

use axum::{
    extract::{Query, State},
    response::Response,
    Form,
};
use tower_cookies::Cookies;
use tracing::error;

use super::found;
use super::page::{self, Escalate};
use crate::extract::CurrentUser;
use crate::flash;
use crate::forms::{NotificationForm, NotificationQuery};
use crate::state::AppState;
use crate::views::{NotificationsPage, Section};

const PATH: &str = "/notificaciones";

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Query(query): Query<NotificationQuery>,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Notificaciones, Escalate::Notifications).await;

    let rows = match state.notifications.list(&query.filter()).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to list notifications: {}", e);
            chrome.fail("Error al cargar las notificaciones");
            Vec::new()
        }
    };
    let recipients = state.users.active_users().await.unwrap_or_else(|e| {
        error!("Failed to load active users: {}", e);
        Vec::new()
    });

    state.views.render(
        "notificaciones",
        &NotificationsPage::new(chrome, &rows, &recipients, &query, page::today()),
    )
}

/// `usuarios_destino` may repeat, so the body is read as raw pairs.
pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = NotificationForm::from_pairs(pairs);

    match form.action().as_str() {
        "crear" | "create" => match state.notifications.create(&user, form.request()).await {
            Ok(outcome) if outcome.is_complete() => flash::success(&cookies, outcome.message()),
            Ok(outcome) => flash::error(&cookies, outcome.message()),
            Err(e) => flash::error(&cookies, e.flash_message("Error al crear la notificación")),
        },
        "marcar_leida" => match form.id() {
            Some(id) => match state.notifications.mark_read(id).await {
                Ok(()) => flash::success(&cookies, "Notificación marcada como leída"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al marcar la notificación")),
            },
            None => flash::error(&cookies, "Error al marcar la notificación"),
        },
        "marcar_todas" => match state.notifications.mark_all_read(&user).await {
            Ok(_) => flash::success(&cookies, "Todas las notificaciones marcadas como leídas"),
            Err(e) => flash::error(&cookies, e.flash_message("Error al marcar las notificaciones")),
        },
        "eliminar" | "delete" => match form.id() {
            Some(id) => match state.notifications.delete(&user, id).await {
                Ok(()) => flash::success(&cookies, "Notificación eliminada exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al eliminar la notificación")),
            },
            None => flash::error(&cookies, "Error al eliminar la notificación"),
        },
        other => flash::error(&cookies, format!("Acción no válida: {}", other)),
    }
    found(PATH)
}
