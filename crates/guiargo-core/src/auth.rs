//! Request-scoped authentication context and role checks

use serde::Serialize;

use crate::domain::{Role, User};
use crate::error::DomainError;

/// Identity of the logged-in user, resolved once per request from the
/// verified session cookie.
#[derive(Debug, Clone, Serialize)]
pub struct AuthContext {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub email: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_collaborator(&self) -> bool {
        self.role == Role::Colaborador
    }

    /// Only administrators may delete records.
    pub fn can_delete(&self) -> bool {
        self.is_admin()
    }

    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::PermissionDenied)
        }
    }

    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

impl From<&User> for AuthContext {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            role: user.role,
            email: user.email.clone(),
        }
    }
}
