//! Notification domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{EntityRef, FollowUpStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NotificationKind {
    #[default]
    Notificacion,
    Alerta,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Notificacion => "Notificacion",
            NotificationKind::Alerta => "Alerta",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Notificacion" => Some(NotificationKind::Notificacion),
            "Alerta" => Some(NotificationKind::Alerta),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Notificacion => "Notificación",
            NotificationKind::Alerta => "Alerta",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::Notificacion => "tipo-notificacion",
            NotificationKind::Alerta => "tipo-alerta",
        }
    }
}

/// Notification (`notificaciones` row)
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub id: i32,
    pub follow_up_id: Option<i32>,
    pub recipient_id: i32,
    pub kind: NotificationKind,
    pub message: String,
    pub sent_at: DateTime<Utc>,
    pub due_date: Option<NaiveDate>,
    pub read: bool,
    pub priority: bool,
}

/// Notification joined with its follow-up and user names, for listings
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRow {
    pub notification: Notification,
    pub follow_up_description: Option<String>,
    pub follow_up_date: Option<NaiveDate>,
    pub follow_up_status: Option<FollowUpStatus>,
    pub recipient_username: Option<String>,
    pub assigned_username: Option<String>,
}

/// Follow-up to create alongside a notification batch
#[derive(Debug, Clone)]
pub struct FollowUpSeed {
    pub entity: EntityRef,
    pub scheduled_date: NaiveDate,
    pub description: String,
}

/// "Create notification" form input, fanned out to one row per recipient
#[derive(Debug, Clone, Validate)]
pub struct NotificationRequest {
    #[validate(length(min = 1, message = "Debe seleccionar al menos un usuario destino"))]
    pub recipients: Vec<i32>,
    pub kind: NotificationKind,
    #[validate(length(min = 1, message = "El mensaje es requerido"))]
    pub message: String,
    pub due_date: Option<NaiveDate>,
    pub priority: bool,
    pub follow_up: Option<FollowUpSeed>,
}

/// Row to insert for a single recipient
#[derive(Debug, Clone, PartialEq)]
pub struct NewNotification {
    pub follow_up_id: Option<i32>,
    pub recipient_id: i32,
    pub kind: NotificationKind,
    pub message: String,
    pub due_date: Option<NaiveDate>,
    pub priority: bool,
}

impl NotificationRequest {
    pub fn rows_for(&self, follow_up_id: Option<i32>) -> Vec<NewNotification> {
        self.recipients
            .iter()
            .map(|&recipient_id| NewNotification {
                follow_up_id,
                recipient_id,
                kind: self.kind,
                message: self.message.clone(),
                due_date: self.due_date,
                priority: self.priority,
            })
            .collect()
    }
}
