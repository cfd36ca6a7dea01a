//! `/clientes` page

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
use crate::forms::{ContactForm, ContactQuery};
use crate::state::AppState;
use crate::views::{ContactPage, Section};

const PATH: &str = "/clientes";

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ContactQuery>,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Clientes, Escalate::Notifications).await;

    let clients = match state.clients.list(&query.filter()).await {
        Ok(clients) => clients,
        Err(e) => {
            error!("Failed to list clients: {}", e);
            chrome.fail("Error al cargar los clientes");
            Vec::new()
        }
    };
    let editing = match query.editing() {
        Some(id) => state.clients.get(id).await.ok().flatten(),
        None => None,
    };

    state
        .views
        .render("clientes", &ContactPage::clients(chrome, &clients, editing.as_ref(), &query))
}

pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ContactForm>,
) -> Response {
    match form.action().as_str() {
        "crear" | "create" => match state.clients.create(&user, form.client_draft()).await {
            Ok(_) => flash::success(&cookies, "Cliente registrado exitosamente"),
            Err(e) => flash::error(&cookies, e.flash_message("Error al registrar el cliente")),
        },
        "actualizar" | "update" => match form.id() {
            Some(id) => match state.clients.update(&user, id, form.client_draft()).await {
                Ok(()) => flash::success(&cookies, "Cliente actualizado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al actualizar el cliente")),
            },
            None => flash::error(&cookies, "Error al actualizar el cliente"),
        },
        "eliminar" | "delete" => match form.id() {
            Some(id) => match state.clients.delete(&user, id).await {
                Ok(()) => flash::success(&cookies, "Cliente eliminado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al eliminar el cliente")),
            },
            None => flash::error(&cookies, "Error al eliminar el cliente"),
        },
        other => flash::error(&cookies, format!("Acción no válida: {}", other)),
    }
    found(PATH)
}
