//! `/empresas` page

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

const PATH: &str = "/empresas";

pub async fn index(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Query(query): Query<ContactQuery>,
) -> Response {
    let mut chrome = page::chrome(&state, &cookies, &user, Section::Empresas, Escalate::Notifications).await;

    let companies = match state.companies.list(&query.filter()).await {
        Ok(companies) => companies,
        Err(e) => {
            error!("Failed to list companies: {}", e);
            chrome.fail("Error al cargar las empresas");
            Vec::new()
        }
    };
    let editing = match query.editing() {
        Some(id) => state.companies.get(id).await.ok().flatten(),
        None => None,
    };

    state
        .views
        .render("empresas", &ContactPage::companies(chrome, &companies, editing.as_ref(), &query))
}

pub async fn submit(
    State(state): State<AppState>,
    cookies: Cookies,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ContactForm>,
) -> Response {
    match form.action().as_str() {
        "crear" | "create" => match state.companies.create(&user, form.company_draft()).await {
            Ok(_) => flash::success(&cookies, "Empresa registrada exitosamente"),
            Err(e) => flash::error(&cookies, e.flash_message("Error al registrar la empresa")),
        },
        "actualizar" | "update" => match form.id() {
            Some(id) => match state.companies.update(&user, id, form.company_draft()).await {
                Ok(()) => flash::success(&cookies, "Empresa actualizada exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al actualizar la empresa")),
            },
            None => flash::error(&cookies, "Error al actualizar la empresa"),
        },
        "eliminar" | "delete" => match form.id() {
            Some(id) => match state.companies.delete(&user, id).await {
                Ok(()) => flash::success(&cookies, "Empresa eliminada exitosamente"),
                Err(e) => flash::error(&cookies, e.flash_message("Error al eliminar la empresa")),
            },
            None => flash::error(&cookies, "Error al eliminar la empresa"),
        },
        other => flash::error(&cookies, format!("Acción no válida: {}", other)),
    }
    found(PATH)
}
