//! `/usuarios` page

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
use crate::forms::{UserForm, UserQuery};
use crate::state::AppState;
use crate::views::{Section, UsersPage};

const PATH: &str = "/usuarios";

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Query(query): Query<UserQuery>,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Usuarios, Escalate::Notifications).await;

    let users = match state.users.list(&query.filter()).await {
        Ok(users) => users,
        Err(e) => {
            error!("Failed to list users: {}", e);
            chrome.fail("Error al cargar los usuarios");
            Vec::new()
        }
    };
    let editing = match query.editing() {
        Some(id) if user.is_admin() => state.users.get(id).await.ok().flatten(),
        _ => None,
    };

    state
        .views
        .render("usuarios", &UsersPage::new(chrome, user.user_id, &users, editing.as_ref(), &query))
}

pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Form(form): Form<UserForm>,
) -> Response {
    match form.action().as_str() {
        "crear" | "create" => match state.users.create(&user, form.draft()).await {
            Ok(_) => flash::success(&cookies, "Usuario registrado exitosamente"),
            Err(e) => flash::error(&cookies, e.flash_message("Error al registrar el usuario")),
        },
        "actualizar" | "update" => match form.id() {
            Some(id) => match state.users.update(&user, id, form.draft()).await {
                Ok(()) => flash::success(&cookies, "Usuario actualizado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al actualizar el usuario")),
            },
            None => flash::error(&cookies, "Error al actualizar el usuario"),
        },
        "eliminar" | "delete" => match form.id() {
            Some(id) => match state.users.delete(&user, id).await {
                Ok(()) => flash::success(&cookies, "Usuario eliminado exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al eliminar el usuario")),
            },
            None => flash::error(&cookies, "Error al eliminar el usuario"),
        },
        other => flash::error(&cookies, format!("Acción no válida: {}", other)),
    }
    found(PATH)
}
