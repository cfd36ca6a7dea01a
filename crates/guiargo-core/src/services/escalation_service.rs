//! Due-date escalation batch

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{follow_up_status, notification_priority};
use crate::error::DomainError;
use crate::repositories::{FollowUpRepository, NotificationRepository};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EscalationReport {
    pub notifications_escalated: u64,
    pub follow_ups_overdue: u64,
}

pub struct EscalationService<N, F>
where
    N: NotificationRepository,
    F: FollowUpRepository,
{
    notification_repo: Arc<N>,
    follow_up_repo: Arc<F>,
}

impl<N, F> EscalationService<N, F>
where
    N: NotificationRepository,
    F: FollowUpRepository,
{
    pub fn new(notification_repo: Arc<N>, follow_up_repo: Arc<F>) -> Self {
        Self { notification_repo, follow_up_repo }
    }

    /// Flags unread notifications whose due date has arrived
    pub async fn escalate_notifications(&self, today: NaiveDate) -> Result<u64, DomainError> {
        let ids: Vec<i32> = self
            .notification_repo
            .escalation_candidates()
            .await?
            .iter()
            .filter(|s| notification_priority(s, today) != s.priority)
            .map(|s| s.id)
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }
        let updated = self.notification_repo.mark_priority(&ids).await?;
        info!("Escalated {} notification(s) to priority", updated);
        Ok(updated)
    }

    /// Moves open follow-ups past their date to `Vencido`
    pub async fn escalate_follow_ups(&self, today: NaiveDate) -> Result<u64, DomainError> {
        let ids: Vec<i32> = self
            .follow_up_repo
            .escalation_candidates()
            .await?
            .iter()
            .filter(|s| follow_up_status(s, today) != s.status)
            .map(|s| s.id)
            .collect();

        if ids.is_empty() {
            return Ok(0);
        }
        let updated = self.follow_up_repo.mark_overdue(&ids).await?;
        info!("Marked {} follow-up(s) as overdue", updated);
        Ok(updated)
    }

    pub async fn run(&self, today: NaiveDate) -> Result<EscalationReport, DomainError> {
        let follow_ups_overdue = self.escalate_follow_ups(today).await?;
        let notifications_escalated = self.escalate_notifications(today).await?;
        debug!(
            "Escalation for {}: {} notification(s), {} follow-up(s)",
            today, notifications_escalated, follow_ups_overdue
        );
        Ok(EscalationReport { notifications_escalated, follow_ups_overdue })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FollowUpSnapshot, FollowUpStatus, NotificationSnapshot};
    use crate::repositories::{MockFollowUpRepository, MockNotificationRepository};
    use std::sync::Mutex;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 9, d).unwrap()
    }

    /// Mocks backed by shared rows so repeated runs observe earlier writes.
    fn stateful_repos(
        notifications: Arc<Mutex<Vec<NotificationSnapshot>>>,
        follow_ups: Arc<Mutex<Vec<FollowUpSnapshot>>>,
    ) -> (MockNotificationRepository, MockFollowUpRepository) {
        let mut n_repo = MockNotificationRepository::new();
        let rows = notifications.clone();
        n_repo.expect_escalation_candidates().returning(move || {
            Ok(rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| !s.read && !s.priority && s.due_date.is_some())
                .copied()
                .collect())
        });
        let rows = notifications;
        n_repo.expect_mark_priority().returning(move |ids| {
            let mut rows = rows.lock().unwrap();
            let mut updated = 0;
            for row in rows.iter_mut().filter(|r| ids.contains(&r.id)) {
                row.priority = true;
                updated += 1;
            }
            Ok(updated)
        });

        let mut f_repo = MockFollowUpRepository::new();
        let rows = follow_ups.clone();
        f_repo.expect_escalation_candidates().returning(move || {
            Ok(rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| s.status == FollowUpStatus::Pendiente && s.completed_on.is_none())
                .copied()
                .collect())
        });
        let rows = follow_ups;
        f_repo.expect_mark_overdue().returning(move |ids| {
            let mut rows = rows.lock().unwrap();
            let mut updated = 0;
            for row in rows.iter_mut().filter(|r| ids.contains(&r.id)) {
                row.status = FollowUpStatus::Vencido;
                updated += 1;
            }
            Ok(updated)
        });

        (n_repo, f_repo)
    }

    #[tokio::test]
    async fn test_batch_is_idempotent() {
        let today = date(15);
        let notifications = Arc::new(Mutex::new(vec![
            NotificationSnapshot { id: 1, due_date: Some(date(10)), read: false, priority: false },
            NotificationSnapshot { id: 2, due_date: Some(today), read: false, priority: false },
            NotificationSnapshot { id: 3, due_date: Some(date(20)), read: false, priority: false },
            NotificationSnapshot { id: 4, due_date: Some(date(1)), read: true, priority: false },
            NotificationSnapshot { id: 5, due_date: None, read: false, priority: true },
        ]));
        let follow_ups = Arc::new(Mutex::new(vec![
            FollowUpSnapshot { id: 1, scheduled_date: date(14), status: FollowUpStatus::Pendiente, completed_on: None },
            FollowUpSnapshot { id: 2, scheduled_date: today, status: FollowUpStatus::Pendiente, completed_on: None },
            FollowUpSnapshot { id: 3, scheduled_date: date(1), status: FollowUpStatus::Cumplido, completed_on: Some(date(2)) },
        ]));

        let (n_repo, f_repo) = stateful_repos(notifications.clone(), follow_ups.clone());
        let service = EscalationService::new(Arc::new(n_repo), Arc::new(f_repo));

        let first = service.run(today).await.unwrap();
        assert_eq!(first, EscalationReport { notifications_escalated: 2, follow_ups_overdue: 1 });
        let after_first = (notifications.lock().unwrap().clone(), follow_ups.lock().unwrap().clone());

        let second = service.run(today).await.unwrap();
        assert_eq!(second, EscalationReport::default());
        let after_second = (notifications.lock().unwrap().clone(), follow_ups.lock().unwrap().clone());
        assert_eq!(after_first, after_second);

        let flags: Vec<bool> = after_second.0.iter().map(|s| s.priority).collect();
        assert_eq!(flags, vec![true, true, false, false, true]);
        assert_eq!(after_second.1[0].status, FollowUpStatus::Vencido);
        assert_eq!(after_second.1[1].status, FollowUpStatus::Pendiente);
        assert_eq!(after_second.1[2].status, FollowUpStatus::Cumplido);
    }

    #[tokio::test]
    async fn test_nothing_due_skips_writes() {
        let mut n_repo = MockNotificationRepository::new();
        n_repo.expect_escalation_candidates().returning(|| {
            Ok(vec![NotificationSnapshot { id: 1, due_date: Some(date(30)), read: false, priority: false }])
        });
        n_repo.expect_mark_priority().never();
        let mut f_repo = MockFollowUpRepository::new();
        f_repo.expect_escalation_candidates().returning(|| Ok(vec![]));
        f_repo.expect_mark_overdue().never();

        let report = EscalationService::new(Arc::new(n_repo), Arc::new(f_repo))
            .run(date(15))
            .await
            .unwrap();
        assert_eq!(report, EscalationReport::default());
    }
}
