//! User domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Panel role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Colaborador,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Colaborador => "colaborador",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "colaborador" => Some(Role::Colaborador),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Colaborador => "Colaborador",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Role::Admin => "status-admin",
            Role::Colaborador => "status-colaborador",
        }
    }
}

/// Panel user (`usuarios` row)
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub active: bool,
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn can_login(&self) -> bool {
        self.active
    }
}

/// Lightweight reference used by pick-lists and joins
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRef {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Form input for creating or updating a user.
///
/// `password` is optional on update; a blank password keeps the stored hash.
#[derive(Debug, Clone, Validate)]
pub struct UserDraft {
    #[validate(length(max = 50, message = "El nombre de usuario es demasiado largo"))]
    pub username: String,

    #[validate(length(max = 150, message = "El correo electrónico es demasiado largo"))]
    pub email: String,

    pub password: Option<String>,
    pub role: Role,
    pub active: bool,
}

/// Row to insert, with the password already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub email: String,
    pub active: bool,
}

/// Column changes for an update; `password_hash: None` keeps the current one
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip_and_default() {
        assert_eq!(Role::from_str("admin"), Some(Role::Admin));
        assert_eq!(Role::from_str("colaborador"), Some(Role::Colaborador));
        assert_eq!(Role::from_str("root"), None);
        assert_eq!(Role::default(), Role::Colaborador);
        assert_eq!(Role::Admin.css_class(), "status-admin");
    }

    #[test]
    fn test_draft_only_bounded_by_column_lengths() {
        let mut draft = UserDraft {
            username: "mario".into(),
            email: "mario".into(),
            password: None,
            role: Role::Colaborador,
            active: true,
        };
        assert!(draft.validate().is_ok());

        draft.username = "m".repeat(51);
        assert!(draft.validate().is_err());
    }
}
