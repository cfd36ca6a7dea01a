// ============================================================================
// Guiargo API - Lookup Endpoints
// File: crates/guiargo-api/src/handlers/entities.rs
// ============================================================================
//! JSON lookups used by the panel forms

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use guiargo_core::domain::{Company, EntityKind, EntitySummary};
use guiargo_core::repositories::EntityDirectory;

use crate::error::ApiError;
use crate::extract::ApiUser;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompanyLookup {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EntityLookup {
    pub tipo: Option<String>,
}

/// Company record as the edit modal reads it
#[derive(Debug, Serialize)]
pub struct CompanyDto {
    pub id: i32,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    pub whatsapp: Option<String>,
    pub direccion: String,
    pub ciudad: String,
    pub rfc: String,
    pub estatus: &'static str,
    pub notas: String,
    pub id_usuario_creacion: Option<i32>,
    pub fecha_registro: DateTime<Utc>,
}

impl From<Company> for CompanyDto {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            nombre: c.name,
            correo: c.email,
            telefono: c.phone,
            whatsapp: c.whatsapp,
            direccion: c.address,
            ciudad: c.city,
            rfc: c.rfc,
            estatus: c.status.as_str(),
            notas: c.notes,
            id_usuario_creacion: c.created_by,
            fecha_registro: c.registered_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    pub success: bool,
    pub empresa: CompanyDto,
}

/// GET /api/empresa?id=N
pub async fn company(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
    Query(lookup): Query<CompanyLookup>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let id: i32 = lookup
        .id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest("ID de empresa requerido".into()))?
        .parse()
        .map_err(|_| ApiError::BadRequest("ID de empresa no válido".into()))?;

    let company = state
        .companies
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Empresa no encontrada".into()))?;

    Ok(Json(CompanyResponse { success: true, empresa: company.into() }))
}

/// GET /api/entidades?tipo=cliente|empresa
pub async fn entities(
    State(state): State<AppState>,
    ApiUser(_user): ApiUser,
    Query(lookup): Query<EntityLookup>,
) -> Result<Json<Vec<EntitySummary>>, ApiError> {
    let tipo = lookup
        .tipo
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Tipo de entidad requerido".into()))?;
    let kind = EntityKind::from_str(tipo)
        .ok_or_else(|| ApiError::BadRequest("Tipo de entidad no válido".into()))?;

    Ok(Json(state.directory.summaries(kind).await?))
}
