//! Per-page view models

use chrono::NaiveDate;
use serde::Serialize;

use guiargo_core::domain::{
    follow_up_badge, notification_badge, CalendarEvent, Client, Company, ContactStatus,
    DashboardStats, EntityKind, EntitySummary, FollowUp, FollowUpRow, FollowUpSnapshot,
    FollowUpStatus, NotificationKind, NotificationRow, NotificationSnapshot, Role, User, UserRef,
};
use guiargo_core::services::FollowUpPickLists;

use super::{display_date, display_datetime, embedded_json, input_date, yes_no_options, Chrome, SelectOption};
use crate::forms::{ContactQuery, FollowUpQuery, NotificationQuery, UserQuery};

fn contact_status_options(current: Option<&str>) -> Vec<SelectOption> {
    ContactStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s.as_str(), s.as_str(), current))
        .collect()
}

fn follow_up_status_options(current: Option<&str>) -> Vec<SelectOption> {
    FollowUpStatus::ALL
        .iter()
        .map(|s| SelectOption::new(s.as_str(), s.as_str(), current))
        .collect()
}

fn role_options(current: Option<&str>) -> Vec<SelectOption> {
    [Role::Admin, Role::Colaborador]
        .iter()
        .map(|r| SelectOption::new(r.as_str(), r.label(), current))
        .collect()
}

fn entity_kind_options(current: Option<&str>) -> Vec<SelectOption> {
    [EntityKind::Cliente, EntityKind::Empresa]
        .iter()
        .map(|k| SelectOption::new(k.as_str(), k.label(), current))
        .collect()
}

fn notification_kind_options(current: Option<&str>) -> Vec<SelectOption> {
    [NotificationKind::Notificacion, NotificationKind::Alerta]
        .iter()
        .map(|k| SelectOption::new(k.as_str(), k.label(), current))
        .collect()
}

fn entity_options(entities: &[EntitySummary], current: Option<i32>) -> Vec<SelectOption> {
    entities
        .iter()
        .map(|e| SelectOption {
            value: e.id.to_string(),
            label: if e.city.is_empty() { e.name.clone() } else { format!("{} ({})", e.name, e.city) },
            selected: current == Some(e.id),
        })
        .collect()
}

fn user_options(users: &[UserRef], current: Option<i32>) -> Vec<SelectOption> {
    users
        .iter()
        .map(|u| SelectOption {
            value: u.id.to_string(),
            label: u.username.clone(),
            selected: current == Some(u.id),
        })
        .collect()
}

/// `https://wa.me/<digits>` for a stored WhatsApp number
fn whatsapp_link(number: Option<&str>) -> Option<String> {
    let digits: String = number?.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then(|| format!("https://wa.me/{}", digits))
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub app_name: String,
    pub username: String,
    pub error: Option<String>,
}

// ----------------------------------------------------------------------------
// Clients and companies
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ContactCard {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub whatsapp_link: Option<String>,
    pub address: String,
    pub city: String,
    pub rfc: Option<String>,
    pub status: &'static str,
    pub status_class: String,
    pub notes: String,
    pub registered: String,
}

impl From<&Client> for ContactCard {
    fn from(c: &Client) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            whatsapp: c.whatsapp.clone(),
            whatsapp_link: whatsapp_link(c.whatsapp.as_deref()),
            address: c.address.clone(),
            city: c.city.clone(),
            rfc: None,
            status: c.status.as_str(),
            status_class: c.status.css_class(),
            notes: c.notes.clone(),
            registered: display_datetime(c.registered_at),
        }
    }
}

impl From<&Company> for ContactCard {
    fn from(c: &Company) -> Self {
        Self {
            id: c.id,
            name: c.name.clone(),
            email: c.email.clone(),
            phone: c.phone.clone(),
            whatsapp: c.whatsapp.clone(),
            whatsapp_link: whatsapp_link(c.whatsapp.as_deref()),
            address: c.address.clone(),
            city: c.city.clone(),
            rfc: Some(c.rfc.clone()),
            status: c.status.as_str(),
            status_class: c.status.css_class(),
            notes: c.notes.clone(),
            registered: display_datetime(c.registered_at),
        }
    }
}

/// Create/edit modal. Clients post `crear`/`actualizar`, companies `create`/`update`.
#[derive(Debug, Clone, Serialize)]
pub struct ContactFormView {
    pub modal_id: &'static str,
    pub title: &'static str,
    pub action_field: &'static str,
    pub action: &'static str,
    pub open: bool,
    pub with_rfc: bool,
    pub id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub rfc: String,
    pub notes: String,
    pub statuses: Vec<SelectOption>,
}

impl ContactFormView {
    fn blank(with_rfc: bool) -> Self {
        Self {
            modal_id: "modal-crear",
            title: if with_rfc { "Nueva empresa" } else { "Nuevo cliente" },
            action_field: if with_rfc { "action" } else { "accion" },
            action: if with_rfc { "create" } else { "crear" },
            open: false,
            with_rfc,
            id: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            city: String::new(),
            rfc: String::new(),
            notes: String::new(),
            statuses: contact_status_options(Some(ContactStatus::default().as_str())),
        }
    }

    fn editing(card: &ContactCard, with_rfc: bool) -> Self {
        Self {
            modal_id: "modal-editar",
            title: if with_rfc { "Editar empresa" } else { "Editar cliente" },
            action: if with_rfc { "update" } else { "actualizar" },
            open: true,
            id: Some(card.id),
            name: card.name.clone(),
            email: card.email.clone(),
            phone: card.phone.clone(),
            whatsapp: card.whatsapp.clone().unwrap_or_default(),
            address: card.address.clone(),
            city: card.city.clone(),
            rfc: card.rfc.clone().unwrap_or_default(),
            notes: card.notes.clone(),
            statuses: contact_status_options(Some(card.status)),
            ..Self::blank(with_rfc)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactFilterView {
    pub search_param: &'static str,
    pub search: String,
    pub city: String,
    pub from: String,
    pub to: String,
    pub statuses: Vec<SelectOption>,
    pub active: bool,
}

impl ContactFilterView {
    fn new(query: &ContactQuery, search_param: &'static str) -> Self {
        let filter = query.filter();
        Self {
            search_param,
            search: filter.search.clone().unwrap_or_default(),
            city: filter.city.clone().unwrap_or_default(),
            from: input_date(filter.registered.from),
            to: input_date(filter.registered.to),
            statuses: contact_status_options(filter.status.map(|s| s.as_str())),
            active: filter.search.is_some()
                || filter.status.is_some()
                || filter.city.is_some()
                || filter.registered.from.is_some()
                || filter.registered.to.is_some(),
        }
    }
}

/// `/clientes` and `/empresas`
#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub rows: Vec<ContactCard>,
    pub total: usize,
    pub filters: ContactFilterView,
    pub new_form: ContactFormView,
    pub edit_form: Option<ContactFormView>,
    pub can_delete: bool,
}

impl ContactPage {
    pub fn clients(chrome: Chrome, clients: &[Client], editing: Option<&Client>, query: &ContactQuery) -> Self {
        let rows: Vec<ContactCard> = clients.iter().map(ContactCard::from).collect();
        Self {
            can_delete: true,
            chrome,
            total: rows.len(),
            rows,
            filters: ContactFilterView::new(query, "busqueda"),
            new_form: ContactFormView::blank(false),
            edit_form: editing.map(|c| ContactFormView::editing(&ContactCard::from(c), false)),
        }
    }

    pub fn companies(chrome: Chrome, companies: &[Company], editing: Option<&Company>, query: &ContactQuery) -> Self {
        let rows: Vec<ContactCard> = companies.iter().map(ContactCard::from).collect();
        Self {
            can_delete: chrome.user.is_admin,
            chrome,
            total: rows.len(),
            rows,
            filters: ContactFilterView::new(query, "search"),
            new_form: ContactFormView::blank(true),
            edit_form: editing.map(|c| ContactFormView::editing(&ContactCard::from(c), true)),
        }
    }
}

// ----------------------------------------------------------------------------
// Users
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct UserRowView {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role_label: &'static str,
    pub role_class: &'static str,
    pub active: bool,
    pub active_label: &'static str,
    pub active_class: &'static str,
    pub registered: String,
    pub is_self: bool,
}

impl UserRowView {
    fn new(user: &User, current_user_id: i32) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role_label: user.role.label(),
            role_class: user.role.css_class(),
            active: user.active,
            active_label: if user.active { "Activo" } else { "Inactivo" },
            active_class: if user.active { "status-badge status-activo" } else { "status-badge status-inactivo" },
            registered: display_datetime(user.registered_at),
            is_self: user.id == current_user_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserFormView {
    pub modal_id: &'static str,
    pub title: &'static str,
    pub action: &'static str,
    pub open: bool,
    pub id: Option<i32>,
    pub username: String,
    pub email: String,
    pub password_required: bool,
    pub roles: Vec<SelectOption>,
    pub actives: Vec<SelectOption>,
}

impl UserFormView {
    fn blank() -> Self {
        Self {
            modal_id: "modal-crear",
            title: "Nuevo usuario",
            action: "crear",
            open: false,
            id: None,
            username: String::new(),
            email: String::new(),
            password_required: true,
            roles: role_options(Some(Role::default().as_str())),
            actives: yes_no_options("Activo", "Inactivo", Some("1")),
        }
    }

    fn editing(user: &User) -> Self {
        Self {
            modal_id: "modal-editar",
            title: "Editar usuario",
            action: "actualizar",
            open: true,
            id: Some(user.id),
            username: user.username.clone(),
            email: user.email.clone(),
            password_required: false,
            roles: role_options(Some(user.role.as_str())),
            actives: yes_no_options("Activo", "Inactivo", Some(if user.active { "1" } else { "0" })),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserFilterView {
    pub search: String,
    pub from: String,
    pub to: String,
    pub roles: Vec<SelectOption>,
    pub actives: Vec<SelectOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub rows: Vec<UserRowView>,
    pub total: usize,
    pub filters: UserFilterView,
    pub new_form: UserFormView,
    pub edit_form: Option<UserFormView>,
    pub is_admin: bool,
}

impl UsersPage {
    pub fn new(chrome: Chrome, current_user_id: i32, users: &[User], editing: Option<&User>, query: &UserQuery) -> Self {
        let filter = query.filter();
        let active = filter.active.map(|a| if a { "1" } else { "0" });
        let rows: Vec<UserRowView> = users.iter().map(|u| UserRowView::new(u, current_user_id)).collect();
        Self {
            is_admin: chrome.user.is_admin,
            chrome,
            total: rows.len(),
            rows,
            filters: UserFilterView {
                search: filter.search.clone().unwrap_or_default(),
                from: input_date(filter.registered.from),
                to: input_date(filter.registered.to),
                roles: role_options(filter.role.map(|r| r.as_str())),
                actives: yes_no_options("Activo", "Inactivo", active),
            },
            new_form: UserFormView::blank(),
            edit_form: editing.map(UserFormView::editing),
        }
    }
}

// ----------------------------------------------------------------------------
// Follow-ups
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpView {
    pub id: i32,
    pub entity_kind: &'static str,
    pub entity_class: &'static str,
    pub entity_name: String,
    pub assigned: String,
    pub scheduled: String,
    pub description: String,
    pub status: &'static str,
    pub status_class: String,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub completed_on: Option<String>,
    pub is_completed: bool,
}

impl FollowUpView {
    fn new(row: &FollowUpRow, today: NaiveDate) -> Self {
        let f = &row.follow_up;
        let badge = follow_up_badge(
            &FollowUpSnapshot {
                id: f.id,
                scheduled_date: f.scheduled_date,
                status: f.status,
                completed_on: f.completed_on,
            },
            today,
        );
        Self {
            id: f.id,
            entity_kind: f.entity.kind().label(),
            entity_class: f.entity.kind().css_class(),
            entity_name: row.entity_name.clone().unwrap_or_else(|| "(eliminado)".to_string()),
            assigned: row.assigned_username.clone().unwrap_or_else(|| "Sin asignar".to_string()),
            scheduled: display_date(f.scheduled_date),
            description: f.description.clone(),
            status: f.status.as_str(),
            status_class: f.status.css_class(),
            badge_label: badge.label(),
            badge_class: badge.css_class(),
            completed_on: f.completed_on.map(display_date),
            is_completed: f.status == FollowUpStatus::Cumplido,
        }
    }
}

/// The entity select is split per kind; the inactive one is disabled client side.
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpFormView {
    pub modal_id: &'static str,
    pub title: &'static str,
    pub action: &'static str,
    pub open: bool,
    pub id: Option<i32>,
    pub kinds: Vec<SelectOption>,
    pub is_company: bool,
    pub clients: Vec<SelectOption>,
    pub companies: Vec<SelectOption>,
    pub users: Vec<SelectOption>,
    pub scheduled: String,
    pub description: String,
    pub statuses: Vec<SelectOption>,
    pub completed_on: String,
}

impl FollowUpFormView {
    fn new(picks: &FollowUpPickLists, editing: Option<&FollowUp>, today: NaiveDate) -> Self {
        match editing {
            Some(f) => {
                let (client, company) = match f.entity.kind() {
                    EntityKind::Cliente => (Some(f.entity.id()), None),
                    EntityKind::Empresa => (None, Some(f.entity.id())),
                };
                Self {
                    modal_id: "modal-editar",
                    title: "Editar seguimiento",
                    action: "actualizar",
                    open: true,
                    id: Some(f.id),
                    kinds: entity_kind_options(Some(f.entity.kind().as_str())),
                    is_company: f.entity.kind() == EntityKind::Empresa,
                    clients: entity_options(&picks.clients, client),
                    companies: entity_options(&picks.companies, company),
                    users: user_options(&picks.users, f.assigned_user_id),
                    scheduled: input_date(Some(f.scheduled_date)),
                    description: f.description.clone(),
                    statuses: follow_up_status_options(Some(f.status.as_str())),
                    completed_on: input_date(f.completed_on),
                }
            }
            None => Self {
                modal_id: "modal-crear",
                title: "Nuevo seguimiento",
                action: "crear",
                open: false,
                id: None,
                kinds: entity_kind_options(Some(EntityKind::Cliente.as_str())),
                is_company: false,
                clients: entity_options(&picks.clients, None),
                companies: entity_options(&picks.companies, None),
                users: user_options(&picks.users, None),
                scheduled: input_date(Some(today)),
                description: String::new(),
                statuses: follow_up_status_options(Some(FollowUpStatus::default().as_str())),
                completed_on: String::new(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpFilterView {
    pub search: String,
    pub from: String,
    pub to: String,
    pub kinds: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
    pub users: Vec<SelectOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FollowUpsPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub rows: Vec<FollowUpView>,
    pub total: usize,
    pub overdue: usize,
    pub filters: FollowUpFilterView,
    pub new_form: FollowUpFormView,
    pub edit_form: Option<FollowUpFormView>,
}

impl FollowUpsPage {
    pub fn new(
        chrome: Chrome,
        rows: &[FollowUpRow],
        picks: &FollowUpPickLists,
        editing: Option<&FollowUp>,
        query: &FollowUpQuery,
        today: NaiveDate,
    ) -> Self {
        let filter = query.filter();
        let rows: Vec<FollowUpView> = rows.iter().map(|r| FollowUpView::new(r, today)).collect();
        Self {
            chrome,
            total: rows.len(),
            overdue: rows.iter().filter(|r| r.status == FollowUpStatus::Vencido.as_str()).count(),
            rows,
            filters: FollowUpFilterView {
                search: filter.search.clone().unwrap_or_default(),
                from: input_date(filter.scheduled.from),
                to: input_date(filter.scheduled.to),
                kinds: entity_kind_options(filter.entity_kind.map(|k| k.as_str())),
                statuses: follow_up_status_options(filter.status.map(|s| s.as_str())),
                users: user_options(&picks.users, filter.assigned_user_id),
            },
            new_form: FollowUpFormView::new(picks, None, today),
            edit_form: editing.map(|f| FollowUpFormView::new(picks, Some(f), today)),
        }
    }
}

// ----------------------------------------------------------------------------
// Notifications
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct NotificationView {
    pub id: i32,
    pub kind: &'static str,
    pub kind_class: &'static str,
    pub message: String,
    pub sent_at: String,
    pub due_date: Option<String>,
    pub read: bool,
    pub priority: bool,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub recipient: String,
    pub follow_up: Option<String>,
    pub follow_up_date: Option<String>,
    pub follow_up_status: Option<&'static str>,
    pub follow_up_status_class: Option<String>,
    pub assigned: Option<String>,
}

impl NotificationView {
    fn new(row: &NotificationRow, today: NaiveDate) -> Self {
        let n = &row.notification;
        let badge = notification_badge(
            &NotificationSnapshot { id: n.id, due_date: n.due_date, read: n.read, priority: n.priority },
            today,
        );
        Self {
            id: n.id,
            kind: n.kind.label(),
            kind_class: n.kind.css_class(),
            message: n.message.clone(),
            sent_at: display_datetime(n.sent_at),
            due_date: n.due_date.map(display_date),
            read: n.read,
            priority: n.priority,
            badge_label: badge.label(),
            badge_class: badge.css_class(),
            recipient: row.recipient_username.clone().unwrap_or_default(),
            follow_up: row.follow_up_description.clone(),
            follow_up_date: row.follow_up_date.map(display_date),
            follow_up_status: row.follow_up_status.map(|s| s.as_str()),
            follow_up_status_class: row.follow_up_status.map(|s| s.css_class()),
            assigned: row.assigned_username.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationFilterView {
    pub from: String,
    pub to: String,
    pub kinds: Vec<SelectOption>,
    pub reads: Vec<SelectOption>,
    pub priorities: Vec<SelectOption>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub rows: Vec<NotificationView>,
    pub total: usize,
    pub filters: NotificationFilterView,
    pub kinds: Vec<SelectOption>,
    pub entity_kinds: Vec<SelectOption>,
    pub recipients: Vec<SelectOption>,
    pub today_input: String,
}

impl NotificationsPage {
    pub fn new(
        chrome: Chrome,
        rows: &[NotificationRow],
        recipients: &[UserRef],
        query: &NotificationQuery,
        today: NaiveDate,
    ) -> Self {
        let filter = query.filter();
        let flag = |v: Option<bool>| v.map(|b| if b { "1" } else { "0" });
        let rows: Vec<NotificationView> = rows.iter().map(|r| NotificationView::new(r, today)).collect();
        Self {
            chrome,
            total: rows.len(),
            rows,
            filters: NotificationFilterView {
                from: input_date(filter.sent.from),
                to: input_date(filter.sent.to),
                kinds: notification_kind_options(filter.kind.map(|k| k.as_str())),
                reads: yes_no_options("Leídas", "No leídas", flag(filter.read)),
                priorities: yes_no_options("Prioritarias", "Normales", flag(filter.priority)),
            },
            kinds: notification_kind_options(Some(NotificationKind::default().as_str())),
            entity_kinds: entity_kind_options(Some(EntityKind::Cliente.as_str())),
            recipients: user_options(recipients, None),
            today_input: input_date(Some(today)),
        }
    }
}

// ----------------------------------------------------------------------------
// Dashboard
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct AgendaItem {
    pub date: String,
    pub kind: &'static str,
    pub title: String,
    pub detail: String,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub href: &'static str,
}

impl From<&CalendarEvent> for AgendaItem {
    fn from(event: &CalendarEvent) -> Self {
        match event {
            CalendarEvent::Notificacion { date, kind, message, badge, .. } => Self {
                date: display_date(*date),
                kind: kind.label(),
                title: message.clone(),
                detail: String::new(),
                badge_label: badge.label(),
                badge_class: badge.css_class(),
                href: "/notificaciones",
            },
            CalendarEvent::Seguimiento { date, entity_kind, entity_name, description, badge, .. } => Self {
                date: display_date(*date),
                kind: "Seguimiento",
                title: entity_name.clone().unwrap_or_else(|| entity_kind.label().to_string()),
                detail: description.clone(),
                badge_label: badge.label(),
                badge_class: badge.css_class(),
                href: "/seguimientos",
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    #[serde(flatten)]
    pub chrome: Chrome,
    pub stats: DashboardStats,
    pub agenda: Vec<AgendaItem>,
    pub calendar_json: String,
    pub today_input: String,
}

impl DashboardPage {
    pub fn new(chrome: Chrome, stats: DashboardStats, events: &[CalendarEvent], today: NaiveDate) -> Self {
        Self {
            chrome,
            stats,
            agenda: events.iter().map(AgendaItem::from).collect(),
            calendar_json: embedded_json(&events),
            today_input: input_date(Some(today)),
        }
    }
}
