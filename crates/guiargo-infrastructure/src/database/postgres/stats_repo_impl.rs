//! Dashboard counters

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use guiargo_core::domain::DashboardStats;
use guiargo_core::error::DomainError;
use guiargo_core::repositories::StatsRepository;

use crate::database::query::db_error;

pub struct PgStatsRepository {
    pool: PgPool,
}

impl PgStatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct StatsRow {
    pub usuarios_activos: i64,
    pub clientes: i64,
    pub empresas: i64,
    pub productos: i64,
    pub notificaciones: i64,
    pub categorias: i64,
}

#[async_trait]
impl StatsRepository for PgStatsRepository {
    async fn dashboard_stats(&self) -> Result<DashboardStats, DomainError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM usuarios WHERE activo = TRUE) AS usuarios_activos,
                (SELECT COUNT(*) FROM clientes) AS clientes,
                (SELECT COUNT(*) FROM empresas) AS empresas,
                (SELECT COUNT(*) FROM productos) AS productos,
                (SELECT COUNT(*) FROM notificaciones) AS notificaciones,
                (SELECT COUNT(*) FROM categorias) AS categorias
            "#,
        )
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("loading dashboard stats"))?;

        Ok(DashboardStats {
            active_users: row.usuarios_activos,
            clients: row.clientes,
            companies: row.empresas,
            products: row.productos,
            notifications: row.notificaciones,
            categories: row.categorias,
        })
    }
}
