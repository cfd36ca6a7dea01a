//! Dashboard: counters and the personal calendar feed

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::auth::AuthContext;
use crate::domain::{
    follow_up_badge, notification_badge, CalendarEvent, DashboardStats, FollowUpSnapshot,
    NotificationSnapshot,
};
use crate::error::DomainError;
use crate::repositories::{FollowUpRepository, NotificationRepository, StatsRepository};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub events: Vec<CalendarEvent>,
}

pub struct DashboardService<S, N, F>
where
    S: StatsRepository,
    N: NotificationRepository,
    F: FollowUpRepository,
{
    stats_repo: Arc<S>,
    notification_repo: Arc<N>,
    follow_up_repo: Arc<F>,
}

impl<S, N, F> DashboardService<S, N, F>
where
    S: StatsRepository,
    N: NotificationRepository,
    F: FollowUpRepository,
{
    pub fn new(stats_repo: Arc<S>, notification_repo: Arc<N>, follow_up_repo: Arc<F>) -> Self {
        Self { stats_repo, notification_repo, follow_up_repo }
    }

    pub async fn overview(&self, actor: &AuthContext, today: NaiveDate) -> Result<DashboardOverview, DomainError> {
        let stats = self.stats_repo.dashboard_stats().await?;
        let events = self.calendar(actor, today).await?;
        Ok(DashboardOverview { stats, events })
    }

    /// Dated notifications and assigned follow-ups, merged by date
    pub async fn calendar(&self, actor: &AuthContext, today: NaiveDate) -> Result<Vec<CalendarEvent>, DomainError> {
        let notifications = self.notification_repo.list_dated_for(actor.user_id).await?;
        let follow_ups = self.follow_up_repo.list_assigned_to(actor.user_id).await?;

        let mut events: Vec<CalendarEvent> = notifications
            .into_iter()
            .filter_map(|n| {
                let date = n.due_date?;
                let snapshot = NotificationSnapshot {
                    id: n.id,
                    due_date: n.due_date,
                    read: n.read,
                    priority: n.priority,
                };
                Some(CalendarEvent::Notificacion {
                    id: n.id,
                    date,
                    kind: n.kind,
                    message: n.message,
                    priority: n.priority,
                    badge: notification_badge(&snapshot, today),
                })
            })
            .collect();

        events.extend(follow_ups.into_iter().map(|row| {
            let f = row.follow_up;
            let snapshot = FollowUpSnapshot {
                id: f.id,
                scheduled_date: f.scheduled_date,
                status: f.status,
                completed_on: f.completed_on,
            };
            CalendarEvent::Seguimiento {
                id: f.id,
                date: f.scheduled_date,
                entity_kind: f.entity.kind(),
                entity_name: row.entity_name,
                description: f.description,
                status: f.status,
                badge: follow_up_badge(&snapshot, today),
            }
        }));

        events.sort_by_key(CalendarEvent::date);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        EntityRef, FollowUp, FollowUpBadge, FollowUpRow, FollowUpStatus, Notification,
        NotificationBadge, NotificationKind, Role,
    };
    use crate::repositories::{MockFollowUpRepository, MockNotificationRepository, MockStatsRepository};
    use chrono::Utc;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn actor() -> AuthContext {
        AuthContext { user_id: 6, username: "raul".into(), role: Role::Colaborador, email: "raul@guiargo.mx".into() }
    }

    fn notification(id: i32, due: NaiveDate) -> Notification {
        Notification {
            id,
            follow_up_id: None,
            recipient_id: 6,
            kind: NotificationKind::Notificacion,
            message: format!("aviso {}", id),
            sent_at: Utc::now(),
            due_date: Some(due),
            read: false,
            priority: false,
        }
    }

    fn follow_up_row(id: i32, scheduled: NaiveDate) -> FollowUpRow {
        FollowUpRow {
            follow_up: FollowUp {
                id,
                entity: EntityRef::Client(2),
                assigned_user_id: Some(6),
                scheduled_date: scheduled,
                description: "Llamar".into(),
                status: FollowUpStatus::Pendiente,
                completed_on: None,
                created_at: Utc::now(),
            },
            entity_name: Some("Ferretería Ruiz".into()),
            assigned_username: Some("raul".into()),
        }
    }

    #[tokio::test]
    async fn test_calendar_merges_and_sorts_by_date() {
        let mut notifications = MockNotificationRepository::new();
        notifications
            .expect_list_dated_for()
            .withf(|id| *id == 6)
            .returning(|_| Ok(vec![notification(1, date(20)), notification(2, date(5))]));
        let mut follow_ups = MockFollowUpRepository::new();
        follow_ups
            .expect_list_assigned_to()
            .returning(|_| Ok(vec![follow_up_row(9, date(12))]));
        let mut stats = MockStatsRepository::new();
        stats.expect_dashboard_stats().returning(|| Ok(DashboardStats { clients: 4, ..Default::default() }));

        let service = DashboardService::new(Arc::new(stats), Arc::new(notifications), Arc::new(follow_ups));
        let overview = service.overview(&actor(), date(12)).await.unwrap();

        let dates: Vec<NaiveDate> = overview.events.iter().map(CalendarEvent::date).collect();
        assert_eq!(dates, vec![date(5), date(12), date(20)]);
        assert_eq!(overview.stats.clients, 4);

        match &overview.events[0] {
            CalendarEvent::Notificacion { badge, .. } => assert_eq!(*badge, NotificationBadge::Vencida),
            other => panic!("unexpected event {:?}", other),
        }
        match &overview.events[1] {
            CalendarEvent::Seguimiento { badge, entity_name, .. } => {
                assert_eq!(*badge, FollowUpBadge::Hoy);
                assert_eq!(entity_name.as_deref(), Some("Ferretería Ruiz"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
