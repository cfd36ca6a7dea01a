// ============================================================================
// Guiargo Infrastructure - PostgreSQL Follow-up Repository
// File: crates/guiargo-infrastructure/src/database/postgres/follow_up_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::info;

use guiargo_core::domain::{
    EntityKind, EntityRef, FollowUp, FollowUpDraft, FollowUpFilter, FollowUpRow, FollowUpSnapshot,
    FollowUpStatus,
};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::FollowUpRepository;

use crate::database::query::{db_error, push_follow_up_filter};

const FOLLOW_UP_COLUMNS: &str = "id, tipo_entidad, id_entidad, id_usuario_asignado, fecha_programada, \
                                 descripcion, estatus, fecha_cumplimiento, fecha_creacion";

const LIST_SELECT: &str = r#"
    SELECT s.id, s.tipo_entidad, s.id_entidad, s.id_usuario_asignado, s.fecha_programada,
           s.descripcion, s.estatus, s.fecha_cumplimiento, s.fecha_creacion,
           COALESCE(c.nombre, e.nombre) AS nombre_entidad,
           u.username AS usuario_asignado
    FROM seguimientos s
    LEFT JOIN clientes c ON s.tipo_entidad = 'cliente' AND c.id = s.id_entidad
    LEFT JOIN empresas e ON s.tipo_entidad = 'empresa' AND e.id = s.id_entidad
    LEFT JOIN usuarios u ON u.id = s.id_usuario_asignado
    WHERE 1=1"#;

pub struct PgFollowUpRepository {
    pool: PgPool,
}

impl PgFollowUpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SeguimientoRow {
    pub id: i32,
    pub tipo_entidad: String,
    pub id_entidad: i32,
    pub id_usuario_asignado: Option<i32>,
    pub fecha_programada: NaiveDate,
    pub descripcion: String,
    pub estatus: String,
    pub fecha_cumplimiento: Option<NaiveDate>,
    pub fecha_creacion: DateTime<Utc>,
}

impl From<SeguimientoRow> for FollowUp {
    fn from(row: SeguimientoRow) -> Self {
        let kind = EntityKind::from_str(&row.tipo_entidad).unwrap_or(EntityKind::Cliente);
        FollowUp {
            id: row.id,
            entity: EntityRef::new(kind, row.id_entidad),
            assigned_user_id: row.id_usuario_asignado,
            scheduled_date: row.fecha_programada,
            description: row.descripcion,
            status: FollowUpStatus::from_str(&row.estatus).unwrap_or_default(),
            completed_on: row.fecha_cumplimiento,
            created_at: row.fecha_creacion,
        }
    }
}

#[derive(Debug, FromRow)]
struct SeguimientoListRow {
    #[sqlx(flatten)]
    pub seguimiento: SeguimientoRow,
    pub nombre_entidad: Option<String>,
    pub usuario_asignado: Option<String>,
}

impl From<SeguimientoListRow> for FollowUpRow {
    fn from(row: SeguimientoListRow) -> Self {
        FollowUpRow {
            follow_up: row.seguimiento.into(),
            entity_name: row.nombre_entidad,
            assigned_username: row.usuario_asignado,
        }
    }
}

#[derive(Debug, FromRow)]
struct SnapshotRow {
    pub id: i32,
    pub fecha_programada: NaiveDate,
    pub estatus: String,
    pub fecha_cumplimiento: Option<NaiveDate>,
}

pub(crate) fn follow_up_list_query(filter: &FollowUpFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(LIST_SELECT);
    push_follow_up_filter(&mut qb, filter);
    qb.push(" ORDER BY s.fecha_programada ASC, s.id ASC");
    qb
}

#[async_trait]
impl FollowUpRepository for PgFollowUpRepository {
    async fn list(&self, filter: &FollowUpFilter) -> Result<Vec<FollowUpRow>, DomainError> {
        let rows: Vec<SeguimientoListRow> = follow_up_list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing follow-ups"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<FollowUp>, DomainError> {
        let row: Option<SeguimientoRow> = sqlx::query_as(&format!(
            "SELECT {} FROM seguimientos WHERE id = $1",
            FOLLOW_UP_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding follow-up by id"))?;

        Ok(row.map(Into::into))
    }

    async fn create(&self, draft: &FollowUpDraft) -> Result<FollowUp, DomainError> {
        let row: SeguimientoRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO seguimientos
                (tipo_entidad, id_entidad, id_usuario_asignado, fecha_programada,
                 descripcion, estatus, fecha_cumplimiento)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            FOLLOW_UP_COLUMNS
        ))
        .bind(draft.entity.kind().as_str())
        .bind(draft.entity.id())
        .bind(draft.assigned_user_id)
        .bind(draft.scheduled_date)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(draft.completed_on)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating follow-up"))?;

        info!("Follow-up created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: i32, draft: &FollowUpDraft) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE seguimientos
            SET tipo_entidad = $1, id_entidad = $2, id_usuario_asignado = $3,
                fecha_programada = $4, descripcion = $5, estatus = $6, fecha_cumplimiento = $7
            WHERE id = $8
            "#,
        )
        .bind(draft.entity.kind().as_str())
        .bind(draft.entity.id())
        .bind(draft.assigned_user_id)
        .bind(draft.scheduled_date)
        .bind(&draft.description)
        .bind(draft.status.as_str())
        .bind(draft.completed_on)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(db_error("updating follow-up"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM seguimientos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting follow-up"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_completed(&self, id: i32, on: NaiveDate) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "UPDATE seguimientos SET estatus = 'Cumplido', fecha_cumplimiento = $2 WHERE id = $1",
        )
        .bind(id)
        .bind(on)
        .execute(&self.pool)
        .await
        .map_err(db_error("completing follow-up"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn escalation_candidates(&self) -> Result<Vec<FollowUpSnapshot>, DomainError> {
        let rows: Vec<SnapshotRow> = sqlx::query_as(
            r#"
            SELECT id, fecha_programada, estatus, fecha_cumplimiento
            FROM seguimientos
            WHERE estatus = 'Pendiente' AND fecha_cumplimiento IS NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading follow-up escalation candidates"))?;

        Ok(rows
            .into_iter()
            .map(|r| FollowUpSnapshot {
                id: r.id,
                scheduled_date: r.fecha_programada,
                status: FollowUpStatus::from_str(&r.estatus).unwrap_or_default(),
                completed_on: r.fecha_cumplimiento,
            })
            .collect())
    }

    async fn mark_overdue(&self, ids: &[i32]) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE seguimientos SET estatus = 'Vencido'
            WHERE id = ANY($1) AND estatus = 'Pendiente' AND fecha_cumplimiento IS NULL
            "#,
        )
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(db_error("marking follow-ups overdue"))?;

        Ok(result.rows_affected())
    }

    async fn list_assigned_to(&self, user_id: i32) -> Result<Vec<FollowUpRow>, DomainError> {
        self.list(&FollowUpFilter { assigned_user_id: Some(user_id), ..Default::default() })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_joins_and_orders_by_schedule() {
        let qb = follow_up_list_query(&FollowUpFilter {
            search: Some("cotización".into()),
            status: Some(FollowUpStatus::Vencido),
            ..Default::default()
        });
        let sql = qb.sql();
        assert!(sql.contains("LEFT JOIN clientes c ON s.tipo_entidad = 'cliente'"));
        assert!(sql.contains("AND (s.descripcion ILIKE $1 OR COALESCE(c.nombre, e.nombre) ILIKE $2)"));
        assert!(sql.ends_with("AND s.estatus = $3 ORDER BY s.fecha_programada ASC, s.id ASC"));
    }
}
