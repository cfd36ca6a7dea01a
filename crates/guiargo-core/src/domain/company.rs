//! Company domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::ContactStatus;

/// Company (`empresas` row)
#[derive(Debug, Clone, Serialize)]
pub struct Company {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: String,
    pub city: String,
    pub rfc: String,
    pub status: ContactStatus,
    pub notes: String,
    pub created_by: Option<i32>,
    pub registered_at: DateTime<Utc>,
}

/// Company form input
#[derive(Debug, Clone, Default, Validate)]
pub struct CompanyDraft {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: String,
    pub city: String,
    pub rfc: String,
    pub status: ContactStatus,
    pub notes: String,
}
