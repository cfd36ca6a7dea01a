// ============================================================================
// Guiargo Infrastructure - PostgreSQL Notification Repository
// File: crates/guiargo-infrastructure/src/database/postgres/notification_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use guiargo_core::domain::{
    FollowUpStatus, NewNotification, Notification, NotificationFilter, NotificationKind,
    NotificationRow, NotificationSnapshot,
};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::NotificationRepository;

use crate::database::query::{db_error, push_notification_filter};

const NOTIFICATION_COLUMNS: &str = "id, id_seguimiento, id_usuario_destino, tipo, mensaje, \
                                    fecha_envio, fecha_limite, leida, prioritaria";

const LIST_SELECT: &str = r#"
    SELECT n.id, n.id_seguimiento, n.id_usuario_destino, n.tipo, n.mensaje,
           n.fecha_envio, n.fecha_limite, n.leida, n.prioritaria,
           s.descripcion AS seguimiento_descripcion,
           s.fecha_programada AS seguimiento_fecha,
           s.estatus AS seguimiento_estatus,
           ud.username AS usuario_destino,
           ua.username AS usuario_asignado
    FROM notificaciones n
    LEFT JOIN seguimientos s ON s.id = n.id_seguimiento
    LEFT JOIN usuarios ud ON ud.id = n.id_usuario_destino
    LEFT JOIN usuarios ua ON ua.id = s.id_usuario_asignado
    WHERE 1=1"#;

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificacionRow {
    pub id: i32,
    pub id_seguimiento: Option<i32>,
    pub id_usuario_destino: i32,
    pub tipo: String,
    pub mensaje: String,
    pub fecha_envio: DateTime<Utc>,
    pub fecha_limite: Option<NaiveDate>,
    pub leida: bool,
    pub prioritaria: bool,
}

impl From<NotificacionRow> for Notification {
    fn from(row: NotificacionRow) -> Self {
        Notification {
            id: row.id,
            follow_up_id: row.id_seguimiento,
            recipient_id: row.id_usuario_destino,
            kind: NotificationKind::from_str(&row.tipo).unwrap_or_default(),
            message: row.mensaje,
            sent_at: row.fecha_envio,
            due_date: row.fecha_limite,
            read: row.leida,
            priority: row.prioritaria,
        }
    }
}

#[derive(Debug, FromRow)]
struct NotificacionListRow {
    #[sqlx(flatten)]
    pub notificacion: NotificacionRow,
    pub seguimiento_descripcion: Option<String>,
    pub seguimiento_fecha: Option<NaiveDate>,
    pub seguimiento_estatus: Option<String>,
    pub usuario_destino: Option<String>,
    pub usuario_asignado: Option<String>,
}

impl From<NotificacionListRow> for NotificationRow {
    fn from(row: NotificacionListRow) -> Self {
        NotificationRow {
            notification: row.notificacion.into(),
            follow_up_description: row.seguimiento_descripcion,
            follow_up_date: row.seguimiento_fecha,
            follow_up_status: row.seguimiento_estatus.as_deref().and_then(FollowUpStatus::from_str),
            recipient_username: row.usuario_destino,
            assigned_username: row.usuario_asignado,
        }
    }
}

#[derive(Debug, FromRow)]
struct SnapshotRow {
    pub id: i32,
    pub fecha_limite: Option<NaiveDate>,
    pub leida: bool,
    pub prioritaria: bool,
}

pub(crate) fn notification_list_query(filter: &NotificationFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(LIST_SELECT);
    push_notification_filter(&mut qb, filter);
    qb.push(" ORDER BY n.prioritaria DESC, n.fecha_limite ASC NULLS LAST, n.fecha_envio DESC");
    qb
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn list(&self, filter: &NotificationFilter) -> Result<Vec<NotificationRow>, DomainError> {
        let rows: Vec<NotificacionListRow> = notification_list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing notifications"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create(&self, notification: &NewNotification) -> Result<Notification, DomainError> {
        let row: NotificacionRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO notificaciones
                (id_seguimiento, id_usuario_destino, tipo, mensaje, fecha_envio, fecha_limite, prioritaria)
            VALUES ($1, $2, $3, $4, NOW(), $5, $6)
            RETURNING {}
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(notification.follow_up_id)
        .bind(notification.recipient_id)
        .bind(notification.kind.as_str())
        .bind(&notification.message)
        .bind(notification.due_date)
        .bind(notification.priority)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating notification"))?;

        Ok(row.into())
    }

    async fn mark_read(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE notificaciones SET leida = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("marking notification read"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, recipient_id: i32) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE notificaciones SET leida = TRUE WHERE id_usuario_destino = $1 AND leida = FALSE",
        )
        .bind(recipient_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("marking all notifications read"))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM notificaciones WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting notification"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count_unread(&self, recipient_id: i32) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notificaciones WHERE id_usuario_destino = $1 AND leida = FALSE",
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting unread notifications"))
    }

    async fn count_priority_unread(&self, recipient_id: i32) -> Result<i64, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notificaciones
            WHERE id_usuario_destino = $1 AND prioritaria = TRUE AND leida = FALSE
            "#,
        )
        .bind(recipient_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("counting priority notifications"))
    }

    async fn escalation_candidates(&self) -> Result<Vec<NotificationSnapshot>, DomainError> {
        let rows: Vec<SnapshotRow> = sqlx::query_as(
            r#"
            SELECT id, fecha_limite, leida, prioritaria
            FROM notificaciones
            WHERE leida = FALSE AND prioritaria = FALSE AND fecha_limite IS NOT NULL
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("loading notification escalation candidates"))?;

        Ok(rows
            .into_iter()
            .map(|r| NotificationSnapshot {
                id: r.id,
                due_date: r.fecha_limite,
                read: r.leida,
                priority: r.prioritaria,
            })
            .collect())
    }

    async fn mark_priority(&self, ids: &[i32]) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "UPDATE notificaciones SET prioritaria = TRUE WHERE id = ANY($1) AND prioritaria = FALSE",
        )
        .bind(ids)
        .execute(&self.pool)
        .await
        .map_err(db_error("escalating notifications"))?;

        Ok(result.rows_affected())
    }

    async fn list_dated_for(&self, recipient_id: i32) -> Result<Vec<Notification>, DomainError> {
        let rows: Vec<NotificacionRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM notificaciones
            WHERE id_usuario_destino = $1 AND fecha_limite IS NOT NULL
            ORDER BY fecha_limite ASC
            "#,
            NOTIFICATION_COLUMNS
        ))
        .bind(recipient_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing dated notifications"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
