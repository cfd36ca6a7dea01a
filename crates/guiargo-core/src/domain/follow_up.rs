//! Follow-up ("seguimiento") domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Kind of entity a follow-up points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Cliente,
    Empresa,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Cliente => "cliente",
            EntityKind::Empresa => "empresa",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cliente" => Some(EntityKind::Cliente),
            "empresa" => Some(EntityKind::Empresa),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Cliente => "Cliente",
            EntityKind::Empresa => "Empresa",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EntityKind::Cliente => "status-cliente",
            EntityKind::Empresa => "status-empresa",
        }
    }
}

/// Tagged reference to a client or a company.
///
/// Persisted as `(tipo_entidad, id_entidad)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityRef {
    Client(i32),
    Company(i32),
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i32) -> Self {
        match kind {
            EntityKind::Cliente => EntityRef::Client(id),
            EntityKind::Empresa => EntityRef::Company(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Client(_) => EntityKind::Cliente,
            EntityRef::Company(_) => EntityKind::Empresa,
        }
    }

    pub fn id(&self) -> i32 {
        match self {
            EntityRef::Client(id) | EntityRef::Company(id) => *id,
        }
    }
}

/// Follow-up status. `Cumplido` is terminal for escalation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FollowUpStatus {
    #[default]
    Pendiente,
    Cumplido,
    Vencido,
}

impl FollowUpStatus {
    pub const ALL: [FollowUpStatus; 3] = [
        FollowUpStatus::Pendiente,
        FollowUpStatus::Cumplido,
        FollowUpStatus::Vencido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpStatus::Pendiente => "Pendiente",
            FollowUpStatus::Cumplido => "Cumplido",
            FollowUpStatus::Vencido => "Vencido",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn css_class(&self) -> String {
        format!("status-badge status-{}", self.as_str().to_lowercase())
    }
}

/// Follow-up (`seguimientos` row)
#[derive(Debug, Clone, Serialize)]
pub struct FollowUp {
    pub id: i32,
    pub entity: EntityRef,
    pub assigned_user_id: Option<i32>,
    pub scheduled_date: NaiveDate,
    pub description: String,
    pub status: FollowUpStatus,
    pub completed_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Follow-up joined with its entity name and assignee, for listings
#[derive(Debug, Clone, Serialize)]
pub struct FollowUpRow {
    pub follow_up: FollowUp,
    pub entity_name: Option<String>,
    pub assigned_username: Option<String>,
}

/// Follow-up form input
#[derive(Debug, Clone, Validate)]
pub struct FollowUpDraft {
    pub entity: EntityRef,
    pub assigned_user_id: i32,
    pub scheduled_date: NaiveDate,
    #[validate(length(max = 5000, message = "La descripción es demasiado larga"))]
    pub description: String,
    pub status: FollowUpStatus,
    pub completed_on: Option<NaiveDate>,
}

impl FollowUpDraft {
    /// Keeps the completion date only for `Cumplido`, defaulting it to `today`.
    pub fn normalized(mut self, today: NaiveDate) -> Self {
        self.completed_on = match self.status {
            FollowUpStatus::Cumplido => self.completed_on.or(Some(today)),
            _ => None,
        };
        self
    }
}
