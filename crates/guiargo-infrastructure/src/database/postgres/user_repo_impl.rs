// ============================================================================
// Guiargo Infrastructure - PostgreSQL User Repository
// File: crates/guiargo-infrastructure/src/database/postgres/user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::{error, info};

use guiargo_core::domain::{NewUser, Role, User, UserChanges, UserFilter, UserRef};
use guiargo_core::error::DomainError;
use guiargo_core::repositories::UserRepository;

use crate::database::query::{db_error, push_user_filter};

const USER_COLUMNS: &str = "id, username, password, rol, email, activo, fecha_registro";

pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct UsuarioRow {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub rol: String,
    pub email: String,
    pub activo: bool,
    pub fecha_registro: DateTime<Utc>,
}

impl From<UsuarioRow> for User {
    fn from(row: UsuarioRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password,
            role: Role::from_str(&row.rol).unwrap_or_default(),
            email: row.email,
            active: row.activo,
            registered_at: row.fecha_registro,
        }
    }
}

#[derive(Debug, FromRow)]
struct UsuarioRefRow {
    pub id: i32,
    pub username: String,
    pub email: String,
}

/// Maps unique violations on `usuarios` to their domain errors.
fn map_write_error(e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some("usuarios_email_key") => DomainError::EmailAlreadyExists,
                _ => DomainError::UsernameAlreadyExists,
            };
        }
    }
    error!("Database error writing user: {}", e);
    DomainError::DatabaseError(e.to_string())
}

pub(crate) fn user_list_query(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM usuarios WHERE 1=1", USER_COLUMNS));
    push_user_filter(&mut qb, filter);
    qb.push(" ORDER BY fecha_registro DESC");
    qb
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UsuarioRow> = user_list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing users"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let row: Option<UsuarioRow> = sqlx::query_as(&format!(
            "SELECT {} FROM usuarios WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by id"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_active_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let row: Option<UsuarioRow> = sqlx::query_as(&format!(
            "SELECT {} FROM usuarios WHERE username = $1 AND activo = TRUE",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding user by username"))?;

        Ok(row.map(|r| r.into()))
    }

    async fn username_taken(&self, username: &str, exclude_id: Option<i32>) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM usuarios
                WHERE username = $1 AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(username)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("checking username"))
    }

    async fn email_taken(&self, email: &str, exclude_id: Option<i32>) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM usuarios
                WHERE LOWER(email) = LOWER($1) AND ($2::INTEGER IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("checking email"))
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let row: UsuarioRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO usuarios (username, password, rol, email, activo)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(&user.email)
        .bind(user.active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        info!("User created: {}", row.id);
        Ok(row.into())
    }

    async fn update(&self, id: i32, changes: &UserChanges) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET username = $1, email = $2, rol = $3, activo = $4,
                password = COALESCE($5, password)
            WHERE id = $6
            "#,
        )
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.role.as_str())
        .bind(changes.active)
        .bind(changes.password_hash.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password_hash(&self, id: i32, password_hash: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE usuarios SET password = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("updating password hash"))?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("deleting user"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting users"))
    }

    async fn list_active(&self) -> Result<Vec<UserRef>, DomainError> {
        let rows: Vec<UsuarioRefRow> = sqlx::query_as(
            "SELECT id, username, email FROM usuarios WHERE activo = TRUE ORDER BY username",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("listing active users"))?;

        Ok(rows
            .into_iter()
            .map(|r| UserRef { id: r.id, username: r.username, email: r.email })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_orders_newest_first() {
        let qb = user_list_query(&UserFilter { active: Some(true), ..Default::default() });
        assert!(qb.sql().starts_with("SELECT id, username, password, rol, email, activo, fecha_registro FROM usuarios"));
        assert!(qb.sql().ends_with("AND activo = $1 ORDER BY fecha_registro DESC"));
    }
}
