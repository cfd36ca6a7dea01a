//! `/seguimientos` page

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
use crate::forms::{FollowUpForm, FollowUpQuery};
use crate::state::AppState;
use crate::views::{FollowUpsPage, Section};

const PATH: &str = "/seguimientos";
const MISSING_FIELDS: &str = "La entidad, el usuario asignado y la fecha son requeridos";

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Query(query): Query<FollowUpQuery>,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Seguimientos, Escalate::All).await;
    let today = page::today();

    let rows = match state.follow_ups.list(&query.filter()).await {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to list follow-ups: {}", e);
            chrome.fail("Error al cargar los seguimientos");
            Vec::new()
        }
    };
    let picks = state.follow_ups.pick_lists().await.unwrap_or_else(|e| {
        error!("Failed to load follow-up pick lists: {}", e);
        Default::default()
    });
    let editing = match query.editing() {
        Some(id) => state.follow_ups.get(id).await.ok().flatten(),
        None => None,
    };

    state.views.render(
        "seguimientos",
        &FollowUpsPage::new(chrome, &rows, &picks, editing.as_ref(), &query, today),
    )
}

pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Form(form): Form<FollowUpForm>,
) -> Response {
    let today = page::today();

    match form.action().as_str() {
        "crear" | "create" => match form.draft() {
            Some(draft) => match state.follow_ups.create(&user, draft, today).await {
                Ok(_) => flash::success(&cookies, "Seguimiento creado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al crear el seguimiento")),
            },
            None => flash::error(&cookies, MISSING_FIELDS),
        },
        "actualizar" | "update" => match (form.id(), form.draft()) {
            (Some(id), Some(draft)) => match state.follow_ups.update(&user, id, draft, today).await {
                Ok(()) => flash::success(&cookies, "Seguimiento actualizado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al actualizar el seguimiento")),
            },
            (None, _) => flash::error(&cookies, "Error al actualizar el seguimiento"),
            (_, None) => flash::error(&cookies, MISSING_FIELDS),
        },
        "eliminar" | "delete" => match form.id() {
            Some(id) => match state.follow_ups.delete(&user, id).await {
                Ok(()) => flash::success(&cookies, "Seguimiento eliminado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al eliminar el seguimiento")),
            },
            None => flash::error(&cookies, "Error al eliminar el seguimiento"),
        },
        "marcar_cumplido" => match form.id() {
            Some(id) => match state.follow_ups.mark_completed(&user, id, today).await {
                Ok(()) => flash::success(&cookies, "Seguimiento marcado como cumplido exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al marcar el seguimiento como cumplido")),
            },
            None => flash::error(&cookies, "Error al marcar el seguimiento como cumplido"),
        },
        other => flash::error(&cookies, format!("Acción no válida: {}", other)),
    }
    found(PATH)
}
