// ============================================================================
// Guiargo API - Views
// File: crates/guiargo-api/src/views/mod.rs
// ============================================================================
//! Handlebars registry and shared page chrome

mod pages;

pub use pages::*;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use tracing::error;

use guiargo_core::{AuthContext, NotificationCounters};

use crate::flash::{Flash, FlashKind};

const PARTIALS: &[(&str, &str)] = &[
    ("head", include_str!("../../templates/partials/head.hbs")),
    ("sidebar", include_str!("../../templates/partials/sidebar.hbs")),
    ("navbar", include_str!("../../templates/partials/navbar.hbs")),
    ("flash", include_str!("../../templates/partials/flash.hbs")),
    ("foot", include_str!("../../templates/partials/foot.hbs")),
    ("contact_form", include_str!("../../templates/partials/contact_form.hbs")),
    ("user_form", include_str!("../../templates/partials/user_form.hbs")),
    ("follow_up_form", include_str!("../../templates/partials/follow_up_form.hbs")),
];

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("../../templates/login.hbs")),
    ("dashboard", include_str!("../../templates/dashboard.hbs")),
    ("clientes", include_str!("../../templates/clientes.hbs")),
    ("empresas", include_str!("../../templates/empresas.hbs")),
    ("usuarios", include_str!("../../templates/usuarios.hbs")),
    ("seguimientos", include_str!("../../templates/seguimientos.hbs")),
    ("notificaciones", include_str!("../../templates/notificaciones.hbs")),
];

const RENDER_FAILURE: &str =
    "<!DOCTYPE html><html lang=\"es\"><body><h1>Error en el servidor</h1></body></html>";

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Compiles every embedded template; fails on the first syntax error.
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, *source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, context: &T) -> Response {
        match self.registry.render(name, context) {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                error!("Failed to render template {}: {}", name, e);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(RENDER_FAILURE)).into_response()
            }
        }
    }
}

pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn display_datetime(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string()
}

pub fn input_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Sidebar entries, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Clientes,
    Empresas,
    Usuarios,
    Seguimientos,
    Notificaciones,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Dashboard,
        Section::Clientes,
        Section::Empresas,
        Section::Usuarios,
        Section::Seguimientos,
        Section::Notificaciones,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Section::Dashboard => "/",
            Section::Clientes => "/clientes",
            Section::Empresas => "/empresas",
            Section::Usuarios => "/usuarios",
            Section::Seguimientos => "/seguimientos",
            Section::Notificaciones => "/notificaciones",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Clientes => "Clientes",
            Section::Empresas => "Empresas",
            Section::Usuarios => "Usuarios",
            Section::Seguimientos => "Seguimientos",
            Section::Notificaciones => "Notificaciones",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub href: &'static str,
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserChip {
    pub username: String,
    pub email: String,
    pub initial: String,
    pub role_label: &'static str,
    pub role_class: &'static str,
    pub is_admin: bool,
}

impl From<&AuthContext> for UserChip {
    fn from(ctx: &AuthContext) -> Self {
        Self {
            username: ctx.username.clone(),
            email: ctx.email.clone(),
            initial: ctx.initial(),
            role_label: ctx.role.label(),
            role_class: ctx.role.css_class(),
            is_admin: ctx.is_admin(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashView {
    pub class: &'static str,
    pub message: String,
}

impl From<Flash> for FlashView {
    fn from(flash: Flash) -> Self {
        let class = match flash.kind {
            FlashKind::Success => "alert alert-success",
            FlashKind::Error => "alert alert-error",
        };
        Self { class, message: flash.message }
    }
}

/// Layout data every authenticated page shares
#[derive(Debug, Clone, Serialize)]
pub struct Chrome {
    pub app_name: String,
    pub title: &'static str,
    pub today: String,
    pub menu: Vec<MenuItem>,
    pub user: UserChip,
    pub counters: NotificationCounters,
    pub flash: Option<FlashView>,
}

impl Chrome {
    pub fn new(
        app_name: &str,
        section: Section,
        user: &AuthContext,
        counters: NotificationCounters,
        flash: Option<Flash>,
        today: NaiveDate,
    ) -> Self {
        Self {
            app_name: app_name.to_string(),
            title: section.label(),
            today: display_date(today),
            menu: Section::ALL
                .iter()
                .map(|s| MenuItem { href: s.path(), label: s.label(), active: *s == section })
                .collect(),
            user: UserChip::from(user),
            counters,
            flash: flash.map(FlashView::from),
        }
    }

    /// Replaces any pending flash with an error shown on this render.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.flash = Some(FlashView::from(Flash { kind: FlashKind::Error, message: message.into() }));
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>, current: Option<&str>) -> Self {
        let value = value.into();
        let selected = current == Some(value.as_str());
        Self { value, label: label.into(), selected }
    }
}

/// `1`/`0` select used by the boolean filters
pub fn yes_no_options(yes: &str, no: &str, current: Option<&str>) -> Vec<SelectOption> {
    vec![SelectOption::new("1", yes, current), SelectOption::new("0", no, current)]
}

/// Serializes data for a `<script type="application/json">` block.
pub fn embedded_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .map(|json| json.replace("</", "<\\/"))
        .unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use guiargo_core::{Client, ContactStatus, Role};

    use crate::forms::ContactQuery;

    fn admin() -> AuthContext {
        AuthContext {
            user_id: 1,
            username: "admin".into(),
            role: Role::Admin,
            email: "admin@guiargo.mx".into(),
        }
    }

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_chrome_marks_active_section() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let chrome = Chrome::new("Guiargo", Section::Empresas, &admin(), Default::default(), None, today);
        let active: Vec<_> = chrome.menu.iter().filter(|m| m.active).map(|m| m.href).collect();
        assert_eq!(active, vec!["/empresas"]);
        assert_eq!(chrome.today, "09/03/2026");
        assert!(chrome.user.is_admin);
    }

    #[test]
    fn test_embedded_json_cannot_close_script() {
        let json = embedded_json(&vec!["</script><script>alert(1)</script>"]);
        assert!(!json.contains("</"));
    }

    #[test]
    fn test_clients_page_renders_escaped_rows() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let counters = NotificationCounters { unread: 3, priority: 1 };
        let chrome = Chrome::new("Guiargo", Section::Clientes, &admin(), counters, None, today);
        let client = Client {
            id: 7,
            name: "<b>Ferretería López</b>".into(),
            email: "ventas@lopez.mx".into(),
            phone: "8112345678".into(),
            whatsapp: Some("+52 81 1234 5678".into()),
            address: String::new(),
            city: "Monterrey".into(),
            status: ContactStatus::EnSeguimiento,
            notes: String::new(),
            created_by: Some(1),
            registered_at: Utc::now(),
        };
        let page = ContactPage::clients(chrome, &[client], None, &ContactQuery::default());

        let html = Views::new().unwrap().registry.render("clientes", &page).unwrap();
        assert!(html.contains("status-badge status-en-seguimiento"));
        assert!(html.contains("&lt;b&gt;Ferretería López&lt;/b&gt;"));
        assert!(html.contains("https://wa.me/528112345678"));
        assert!(html.contains("counter-priority"));
        assert!(!html.contains("modal-editar"));
    }

    #[test]
    fn test_select_option_selected() {
        let options = yes_no_options("Sí", "No", Some("0"));
        assert!(!options[0].selected);
        assert!(options[1].selected);
    }
}
