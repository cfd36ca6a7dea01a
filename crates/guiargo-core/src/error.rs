//! Domain errors
//!
//! User-facing variants render the exact text shown in the panel's flash
//! messages.

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Usuario no encontrado")]
    UserNotFound,

    #[error("Usuario inactivo")]
    UserNotActive,

    #[error("Contraseña incorrecta")]
    InvalidCredentials,

    #[error("Por favor, complete todos los campos")]
    MissingCredentials,

    #[error("El nombre de usuario ya existe")]
    UsernameAlreadyExists,

    #[error("El correo electrónico ya existe")]
    EmailAlreadyExists,

    #[error("No puedes eliminar tu propio usuario")]
    CannotDeleteSelf,

    #[error("No tienes permisos para realizar esta acción")]
    PermissionDenied,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Password hash error: {0}")]
    PasswordHashError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Whether the message is meant to be shown to the panel user as is.
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            DomainError::SessionError(_)
                | DomainError::PasswordHashError(_)
                | DomainError::DatabaseError(_)
                | DomainError::InternalError(_)
        )
    }

    /// Flash text for this error, or `fallback` when the cause is internal.
    pub fn flash_message(&self, fallback: &str) -> String {
        if self.is_user_facing() {
            self.to_string()
        } else {
            fallback.to_string()
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Datos inválidos".to_string());

        DomainError::ValidationError(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_errors_use_fallback() {
        let err = DomainError::DatabaseError("connection reset".into());
        assert_eq!(err.flash_message("Error al registrar el cliente"), "Error al registrar el cliente");
    }

    #[test]
    fn test_user_facing_errors_keep_their_text() {
        assert_eq!(
            DomainError::CannotDeleteSelf.flash_message("Error"),
            "No puedes eliminar tu propio usuario"
        );
        assert_eq!(
            DomainError::PermissionDenied.flash_message("Error"),
            "No tienes permisos para realizar esta acción"
        );
    }
}
