//! Dynamic WHERE-clause builders for the listing filters

use guiargo_core::domain::{ContactFilter, DateRange, FollowUpFilter, NotificationFilter, UserFilter};
use guiargo_core::error::DomainError;
use guiargo_shared::utils::day_start;
use sqlx::{Postgres, QueryBuilder};
use tracing::error;

/// `%term%` with LIKE wildcards in the term escaped
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Logs the sqlx error and converts it into a domain error.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}

/// Range over a `DATE` column, both ends inclusive
fn push_date_range(qb: &mut QueryBuilder<'static, Postgres>, column: &str, range: &DateRange) {
    if let Some(from) = range.from {
        qb.push(format!(" AND {} >= ", column)).push_bind(from);
    }
    if let Some(to) = range.to {
        qb.push(format!(" AND {} <= ", column)).push_bind(to);
    }
}

/// Range over a `TIMESTAMPTZ` column. Days are bounded on the server clock
/// so the session time zone never shifts them.
fn push_day_range(qb: &mut QueryBuilder<'static, Postgres>, column: &str, range: &DateRange) {
    if let Some(from) = range.from {
        qb.push(format!(" AND {} >= ", column)).push_bind(day_start(from));
    }
    if let Some(next) = range.to.and_then(|to| to.succ_opt()) {
        qb.push(format!(" AND {} < ", column)).push_bind(day_start(next));
    }
}

/// Filters shared by `clientes` and `empresas`
pub(crate) fn push_contact_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &ContactFilter) {
    if let Some(search) = &filter.search {
        qb.push(" AND nombre ILIKE ").push_bind(like_pattern(search));
    }
    if let Some(status) = filter.status {
        qb.push(" AND estatus = ").push_bind(status.as_str());
    }
    if let Some(city) = &filter.city {
        qb.push(" AND ciudad ILIKE ").push_bind(like_pattern(city));
    }
    push_day_range(qb, "fecha_registro", &filter.registered);
}

pub(crate) fn push_user_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &UserFilter) {
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (username ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR email ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(role) = filter.role {
        qb.push(" AND rol = ").push_bind(role.as_str());
    }
    if let Some(active) = filter.active {
        qb.push(" AND activo = ").push_bind(active);
    }
    push_day_range(qb, "fecha_registro", &filter.registered);
}

/// Expects the `seguimientos s` / `clientes c` / `empresas e` aliases
pub(crate) fn push_follow_up_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &FollowUpFilter) {
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (s.descripcion ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR COALESCE(c.nombre, e.nombre) ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(kind) = filter.entity_kind {
        qb.push(" AND s.tipo_entidad = ").push_bind(kind.as_str());
    }
    if let Some(status) = filter.status {
        qb.push(" AND s.estatus = ").push_bind(status.as_str());
    }
    if let Some(user_id) = filter.assigned_user_id {
        qb.push(" AND s.id_usuario_asignado = ").push_bind(user_id);
    }
    push_date_range(qb, "s.fecha_programada", &filter.scheduled);
}

/// Expects the `notificaciones n` alias
pub(crate) fn push_notification_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &NotificationFilter) {
    if let Some(kind) = filter.kind {
        qb.push(" AND n.tipo = ").push_bind(kind.as_str());
    }
    if let Some(read) = filter.read {
        qb.push(" AND n.leida = ").push_bind(read);
    }
    if let Some(priority) = filter.priority {
        qb.push(" AND n.prioritaria = ").push_bind(priority);
    }
    push_day_range(qb, "n.fecha_envio", &filter.sent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use guiargo_core::domain::{ContactStatus, EntityKind, NotificationKind, Role};

    fn base() -> QueryBuilder<'static, Postgres> {
        QueryBuilder::new("SELECT * FROM t WHERE 1=1")
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ruiz"), "%ruiz%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_empty_filter_adds_nothing() {
        let mut qb = base();
        push_contact_filter(&mut qb, &ContactFilter::default());
        assert_eq!(qb.sql(), "SELECT * FROM t WHERE 1=1");
    }

    #[test]
    fn test_contact_filter_composes_in_order() {
        let mut qb = base();
        let filter = ContactFilter {
            search: Some("ruiz".into()),
            status: Some(ContactStatus::EnSeguimiento),
            city: Some("monterrey".into()),
            registered: DateRange::new(NaiveDate::from_ymd_opt(2026, 1, 1), NaiveDate::from_ymd_opt(2026, 1, 31)),
        };
        push_contact_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM t WHERE 1=1 AND nombre ILIKE $1 AND estatus = $2 AND ciudad ILIKE $3 \
             AND fecha_registro >= $4 AND fecha_registro < $5"
        );
    }

    #[test]
    fn test_city_and_status_filter() {
        let mut qb = base();
        let filter = ContactFilter {
            status: Some(ContactStatus::Agendado),
            city: Some("Mexico".into()),
            ..Default::default()
        };
        push_contact_filter(&mut qb, &filter);
        assert_eq!(qb.sql(), "SELECT * FROM t WHERE 1=1 AND estatus = $1 AND ciudad ILIKE $2");
    }

    #[test]
    fn test_sent_range_is_bounded_by_day_starts() {
        let mut qb = base();
        let filter = NotificationFilter {
            sent: DateRange::new(NaiveDate::from_ymd_opt(2026, 5, 1), NaiveDate::from_ymd_opt(2026, 5, 1)),
            ..Default::default()
        };
        push_notification_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM t WHERE 1=1 AND n.fecha_envio >= $1 AND n.fecha_envio < $2"
        );
    }

    #[test]
    fn test_user_search_matches_username_or_email() {
        let mut qb = base();
        let filter = UserFilter {
            search: Some("ana".into()),
            role: Some(Role::Admin),
            active: Some(false),
            ..Default::default()
        };
        push_user_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM t WHERE 1=1 AND (username ILIKE $1 OR email ILIKE $2) AND rol = $3 AND activo = $4"
        );
    }

    #[test]
    fn test_follow_up_filter_uses_aliases() {
        let mut qb = base();
        let filter = FollowUpFilter {
            entity_kind: Some(EntityKind::Empresa),
            assigned_user_id: Some(3),
            scheduled: DateRange::new(None, NaiveDate::from_ymd_opt(2026, 2, 1)),
            ..Default::default()
        };
        push_follow_up_filter(&mut qb, &filter);
        assert_eq!(
            qb.sql(),
            "SELECT * FROM t WHERE 1=1 AND s.tipo_entidad = $1 AND s.id_usuario_asignado = $2 \
             AND s.fecha_programada <= $3"
        );
    }

    #[test]
    fn test_unread_filter_is_applied() {
        let mut qb = base();
        let filter = NotificationFilter {
            kind: Some(NotificationKind::Alerta),
            read: Some(false),
            ..Default::default()
        };
        push_notification_filter(&mut qb, &filter);
        assert_eq!(qb.sql(), "SELECT * FROM t WHERE 1=1 AND n.tipo = $1 AND n.leida = $2");
    }
}
