//! # Guiargo Core
//! 
//! Domain entities, escalation rules, services, and repository traits for the
//! administration panel.

pub mod auth;
pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use auth::AuthContext;
pub use domain::*;
pub use error::DomainError;
