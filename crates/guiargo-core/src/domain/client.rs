//! Client domain entity

use chrono::{DateTime, Utc};
use serde::Serialize;
use validator::Validate;

use super::ContactStatus;

/// Client (`clientes` row)
#[derive(Debug, Clone, Serialize)]
pub struct Client {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: String,
    pub city: String,
    pub status: ContactStatus,
    pub notes: String,
    pub created_by: Option<i32>,
    pub registered_at: DateTime<Utc>,
}

/// Client form input
#[derive(Debug, Clone, Default, Validate)]
pub struct ClientDraft {
    #[validate(length(min = 1, message = "El nombre es requerido"))]
    pub name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub address: String,
    pub city: String,
    pub status: ContactStatus,
    pub notes: String,
}
