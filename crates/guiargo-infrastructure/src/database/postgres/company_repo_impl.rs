//! PostgreSQL company repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;

use guiargo_core::domain::{Company, CompanyDraft, ContactFilter, ContactStatus};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::CompanyRepository;

use crate::database::query::{db_error, push_contact_filter};

const COMPANY_COLUMNS: &str = "id, nombre, correo, telefono, whatsapp, direccion, ciudad, rfc, \
                               estatus, notas, id_usuario_creacion, fecha_registro";

pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EmpresaRow {
    pub id: i32,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    pub whatsapp: Option<String>,
    pub direccion: String,
    pub ciudad: String,
    pub rfc: String,
    pub estatus: String,
    pub notas: String,
    pub id_usuario_creacion: Option<i32>,
    pub fecha_registro: DateTime<Utc>,
}

impl From<EmpresaRow> for Company {
    fn from(row: EmpresaRow) -> Self {
        Company {
            id: row.id,
            name: row.nombre,
            email: row.correo,
            phone: row.telefono,
            whatsapp: row.whatsapp,
            address: row.direccion,
            city: row.ciudad,
            rfc: row.rfc,
            status: ContactStatus::from_str(&row.estatus).unwrap_or_default(),
            notes: row.notas,
            created_by: row.id_usuario_creacion,
            registered_at: row.fecha_registro,
        }
    }
}

pub(crate) fn company_list_query(filter: &ContactFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM empresas WHERE 1=1", COMPANY_COLUMNS));
    push_contact_filter(&mut qb, filter);
    qb.push(" ORDER BY fecha_registro DESC");
    qb
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Company>, DomainError> {
        let rows: Vec<EmpresaRow> = company_list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing companys"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Company>, DomainError> {
        let row: Option<EmpresaRow> = sqlx::query_as(&format!(
            "SELECT {} FROM empresas WHERE id = $1",
            COMPANY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding company by id"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, draft: &CompanyDraft, created_by: i32) -> Result<Company, DomainError> {
        let row: EmpresaRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO empresas
                (nombre, correo, telefono, whatsapp, direccion, ciudad, rfc, estatus, notas, id_usuario_creacion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            COMPANY_COLUMNS
        ))
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.whatsapp.as_deref())
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.rfc)
        .bind(draft.status.as_str())
        .bind(&draft.notes)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating company"))?;

        info!("Company created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: i32, draft: &CompanyDraft) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE empresas
            SET nombre = $1, correo = $2, telefono = $3, whatsapp = $4,
                direccion = $5, ciudad = $6, rfc = $7, estatus = $8, notas = $9
            WHERE id = $10
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.whatsapp.as_deref())
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(&draft.rfc)
        .bind(draft.status.as_str())
        .bind(&draft.notes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating company"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM empresas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting company"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_orders_newest_first() {
        let qb = company_list_query(&ContactFilter {
            search: Some("aceros".into()),
            city: Some("saltillo".into()),
            ..Default::default()
        });
        assert!(qb
            .sql()
            .ends_with("FROM empresas WHERE 1=1 AND nombre ILIKE $1 AND ciudad ILIKE $2 ORDER BY fecha_registro DESC"));
    }
}
