//! Client/company lookups keyed by entity kind

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use guiargo_core::domain::{ContactStatus, EntityKind, EntityRef, EntitySummary};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::EntityDirectory;

use crate::database::query::db_error;

pub struct PgEntityDirectory {
    pool: PgPool,
}

impl PgEntityDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_for(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Cliente => "clientes",
        EntityKind::Empresa => "empresas",
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    pub id: i32,
    pub nombre: String,
    pub ciudad: String,
}

impl From<SummaryRow> for EntitySummary {
    fn from(row: SummaryRow) -> Self {
        EntitySummary { id: row.id, name: row.nombre, city: row.ciudad }
    }
}

#[async_trait]
impl EntityDirectory for PgEntityDirectory {
    async fn name_of(&self, entity: EntityRef) -> Result<Option<String>, DomainError> {
        let sql = format!("SELECT nombre FROM {} WHERE id = $1", table_for(entity.kind()));
        sqlx::query_scalar(&sql)
            .bind(entity.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("resolving entity name"))
    }

    async fn summaries(&self, kind: EntityKind) -> Result<Vec<EntitySummary>, DomainError> {
        let sql = format!("SELECT id, nombre, ciudad FROM {} ORDER BY nombre", table_for(kind));
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing entities"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn summaries_with_status(
        &self,
        kind: EntityKind,
        status: ContactStatus,
    ) -> Result<Vec<EntitySummary>, DomainError> {
        let sql = format!(
            "SELECT id, nombre, ciudad FROM {} WHERE estatus = $1 ORDER BY nombre",
            table_for(kind)
        );
        let rows: Vec<SummaryRow> = sqlx::query_as(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing entities by status"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
