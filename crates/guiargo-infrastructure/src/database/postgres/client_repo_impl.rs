//! PostgreSQL client repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;

use guiargo_core::domain::{Client, ClientDraft, ContactFilter, ContactStatus};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::ClientRepository;

use crate::database::query::{db_error, push_contact_filter};

const CLIENT_COLUMNS: &str = "id, nombre, correo, telefono, whatsapp, direccion, ciudad, \
                              estatus, notas, id_usuario_creacion, fecha_registro";

pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClienteRow {
    pub id: i32,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
    pub whatsapp: Option<String>,
    pub direccion: String,
    pub ciudad: String,
    pub estatus: String,
    pub notas: String,
    pub id_usuario_creacion: Option<i32>,
    pub fecha_registro: DateTime<Utc>,
}

impl From<ClienteRow> for Client {
    fn from(row: ClienteRow) -> Self {
        Client {
            id: row.id,
            name: row.nombre,
            email: row.correo,
            phone: row.telefono,
            whatsapp: row.whatsapp,
            address: row.direccion,
            city: row.ciudad,
            status: ContactStatus::from_str(&row.estatus).unwrap_or_default(),
            notes: row.notas,
            created_by: row.id_usuario_creacion,
            registered_at: row.fecha_registro,
        }
    }
}

pub(crate) fn client_list_query(filter: &ContactFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM clientes WHERE 1=1", CLIENT_COLUMNS));
    push_contact_filter(&mut qb, filter);
    qb.push(" ORDER BY nombre ASC");
    qb
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    async fn list(&self, filter: &ContactFilter) -> Result<Vec<Client>, DomainError> {
        let rows: Vec<ClienteRow> = client_list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing clients"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Client>, DomainError> {
        let row: Option<ClienteRow> = sqlx::query_as(&format!(
            "SELECT {} FROM clientes WHERE id = $1",
            CLIENT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding client by id"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, draft: &ClientDraft, created_by: i32) -> Result<Client, DomainError> {
        let row: ClienteRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO clientes
                (nombre, correo, telefono, whatsapp, direccion, ciudad, estatus, notas, id_usuario_creacion)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            CLIENT_COLUMNS
        ))
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.whatsapp.as_deref())
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(draft.status.as_str())
        .bind(&draft.notes)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating client"))?;

        info!("Client created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: i32, draft: &ClientDraft) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE clientes
            SET nombre = $1, correo = $2, telefono = $3, whatsapp = $4,
                direccion = $5, ciudad = $6, estatus = $7, notas = $8
            WHERE id = $9
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.email)
        .bind(&draft.phone)
        .bind(draft.whatsapp.as_deref())
        .bind(&draft.address)
        .bind(&draft.city)
        .bind(draft.status.as_str())
        .bind(&draft.notes)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating client"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM clientes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting client"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_orders_by_name() {
        let qb = client_list_query(&ContactFilter {
            status: Some(ContactStatus::Agendado),
            ..Default::default()
        });
        assert!(qb.sql().ends_with("FROM clientes WHERE 1=1 AND estatus = $1 ORDER BY nombre ASC"));
    }
}
