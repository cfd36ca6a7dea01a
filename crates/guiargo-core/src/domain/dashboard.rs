//! Dashboard read models

use chrono::NaiveDate;
use serde::Serialize;

use super::{
    EntityKind, FollowUpBadge, FollowUpStatus, NotificationBadge, NotificationKind,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub active_users: i64,
    pub clients: i64,
    pub companies: i64,
    pub products: i64,
    pub notifications: i64,
    pub categories: i64,
}

/// Navbar badge counts for the current user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NotificationCounters {
    pub unread: i64,
    pub priority: i64,
}

/// One entry of the dashboard calendar feed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tipo_evento", rename_all = "lowercase")]
pub enum CalendarEvent {
    Notificacion {
        id: i32,
        date: NaiveDate,
        kind: NotificationKind,
        message: String,
        priority: bool,
        badge: NotificationBadge,
    },
    Seguimiento {
        id: i32,
        date: NaiveDate,
        entity_kind: EntityKind,
        entity_name: Option<String>,
        description: String,
        status: FollowUpStatus,
        badge: FollowUpBadge,
    },
}

impl CalendarEvent {
    pub fn date(&self) -> NaiveDate {
        match self {
            CalendarEvent::Notificacion { date, .. } | CalendarEvent::Seguimiento { date, .. } => *date,
        }
    }
}
