//! Due-date escalation rules
//!
//! Pure functions over a row snapshot and the current date. The batch in
//! [`crate::services::EscalationService`] applies them and persists only the
//! rows whose state changed. Badges are computed at render time and never
//! stored.

use chrono::NaiveDate;
use serde::Serialize;

use super::FollowUpStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSnapshot {
    pub id: i32,
    pub due_date: Option<NaiveDate>,
    pub read: bool,
    pub priority: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpSnapshot {
    pub id: i32,
    pub scheduled_date: NaiveDate,
    pub status: FollowUpStatus,
    pub completed_on: Option<NaiveDate>,
}

/// New priority flag. Never clears a flag that is already set.
pub fn notification_priority(snapshot: &NotificationSnapshot, today: NaiveDate) -> bool {
    if snapshot.priority {
        return true;
    }
    match snapshot.due_date {
        Some(due) => due <= today && !snapshot.read,
        None => false,
    }
}

/// New status. Only an open `Pendiente` past its date moves, to `Vencido`.
pub fn follow_up_status(snapshot: &FollowUpSnapshot, today: NaiveDate) -> FollowUpStatus {
    match snapshot.status {
        FollowUpStatus::Pendiente
            if snapshot.completed_on.is_none() && snapshot.scheduled_date < today =>
        {
            FollowUpStatus::Vencido
        }
        status => status,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationBadge {
    Hoy,
    Vencida,
    Prioritaria,
    Normal,
}

impl NotificationBadge {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationBadge::Hoy => "HOY",
            NotificationBadge::Vencida => "VENCIDA",
            NotificationBadge::Prioritaria => "PRIORITARIA",
            NotificationBadge::Normal => "NORMAL",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationBadge::Hoy => "badge-hoy",
            NotificationBadge::Vencida => "badge-vencida",
            NotificationBadge::Prioritaria => "badge-prioritaria",
            NotificationBadge::Normal => "badge-normal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowUpBadge {
    Hoy,
    Vencido,
    Cumplido,
    Pendiente,
}

impl FollowUpBadge {
    pub fn label(&self) -> &'static str {
        match self {
            FollowUpBadge::Hoy => "HOY",
            FollowUpBadge::Vencido => "VENCIDO",
            FollowUpBadge::Cumplido => "CUMPLIDO",
            FollowUpBadge::Pendiente => "PENDIENTE",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FollowUpBadge::Hoy => "badge-hoy",
            FollowUpBadge::Vencido => "badge-vencida",
            FollowUpBadge::Cumplido => "badge-cumplido",
            FollowUpBadge::Pendiente => "badge-normal",
        }
    }
}

pub fn notification_badge(snapshot: &NotificationSnapshot, today: NaiveDate) -> NotificationBadge {
    match snapshot.due_date {
        Some(due) if due == today => NotificationBadge::Hoy,
        Some(due) if due < today && !snapshot.read => NotificationBadge::Vencida,
        _ if snapshot.priority => NotificationBadge::Prioritaria,
        _ => NotificationBadge::Normal,
    }
}

pub fn follow_up_badge(snapshot: &FollowUpSnapshot, today: NaiveDate) -> FollowUpBadge {
    let done = snapshot.status == FollowUpStatus::Cumplido;
    if snapshot.scheduled_date == today && !done {
        FollowUpBadge::Hoy
    } else if snapshot.scheduled_date < today && !done {
        FollowUpBadge::Vencido
    } else if done {
        FollowUpBadge::Cumplido
    } else {
        FollowUpBadge::Pendiente
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn notif(due: Option<NaiveDate>, read: bool, priority: bool) -> NotificationSnapshot {
        NotificationSnapshot { id: 1, due_date: due, read, priority }
    }

    fn follow(scheduled: NaiveDate, status: FollowUpStatus, completed_on: Option<NaiveDate>) -> FollowUpSnapshot {
        FollowUpSnapshot { id: 1, scheduled_date: scheduled, status, completed_on }
    }

    #[test]
    fn test_due_today_or_past_unread_becomes_priority() {
        let today = date(2026, 5, 15);
        assert!(notification_priority(&notif(Some(today), false, false), today));
        assert!(notification_priority(&notif(Some(date(2026, 5, 1)), false, false), today));
    }

    #[test]
    fn test_future_read_or_undated_stays_normal() {
        let today = date(2026, 5, 15);
        assert!(!notification_priority(&notif(Some(date(2026, 5, 16)), false, false), today));
        assert!(!notification_priority(&notif(Some(date(2026, 5, 1)), true, false), today));
        assert!(!notification_priority(&notif(None, false, false), today));
    }

    #[test]
    fn test_priority_is_monotonic() {
        let today = date(2026, 5, 15);
        let cases = [
            notif(None, false, true),
            notif(None, true, true),
            notif(Some(date(2026, 6, 1)), false, true),
            notif(Some(date(2026, 6, 1)), true, true),
            notif(Some(date(2026, 1, 1)), true, true),
        ];
        for snapshot in cases {
            assert!(notification_priority(&snapshot, today), "{:?}", snapshot);
        }
    }

    #[test]
    fn test_pending_in_the_past_becomes_overdue() {
        let today = date(2026, 5, 15);
        let s = follow(date(2026, 5, 14), FollowUpStatus::Pendiente, None);
        assert_eq!(follow_up_status(&s, today), FollowUpStatus::Vencido);
    }

    #[test]
    fn test_pending_today_is_not_overdue() {
        let today = date(2026, 5, 15);
        let s = follow(today, FollowUpStatus::Pendiente, None);
        assert_eq!(follow_up_status(&s, today), FollowUpStatus::Pendiente);
    }

    #[test]
    fn test_completed_is_terminal() {
        let today = date(2026, 5, 15);
        let s = follow(date(2026, 1, 1), FollowUpStatus::Cumplido, Some(date(2026, 1, 2)));
        assert_eq!(follow_up_status(&s, today), FollowUpStatus::Cumplido);

        let s = follow(date(2026, 1, 1), FollowUpStatus::Pendiente, Some(date(2026, 1, 2)));
        assert_eq!(follow_up_status(&s, today), FollowUpStatus::Pendiente);
    }

    #[test]
    fn test_rules_are_idempotent() {
        let today = date(2026, 5, 15);
        let n = notif(Some(date(2026, 5, 10)), false, false);
        let once = NotificationSnapshot { priority: notification_priority(&n, today), ..n };
        assert_eq!(notification_priority(&once, today), once.priority);

        let f = follow(date(2026, 5, 10), FollowUpStatus::Pendiente, None);
        let once = FollowUpSnapshot { status: follow_up_status(&f, today), ..f };
        assert_eq!(follow_up_status(&once, today), once.status);
    }

    #[test]
    fn test_notification_badges() {
        let today = date(2026, 5, 15);
        assert_eq!(notification_badge(&notif(Some(today), true, true), today), NotificationBadge::Hoy);
        assert_eq!(notification_badge(&notif(Some(date(2026, 5, 2)), false, true), today), NotificationBadge::Vencida);
        assert_eq!(notification_badge(&notif(Some(date(2026, 5, 20)), false, true), today), NotificationBadge::Prioritaria);
        assert_eq!(notification_badge(&notif(None, false, false), today), NotificationBadge::Normal);
        assert_eq!(NotificationBadge::Vencida.label(), "VENCIDA");
    }

    #[test]
    fn test_follow_up_badges() {
        let today = date(2026, 5, 15);
        assert_eq!(follow_up_badge(&follow(today, FollowUpStatus::Pendiente, None), today), FollowUpBadge::Hoy);
        assert_eq!(
            follow_up_badge(&follow(date(2026, 5, 1), FollowUpStatus::Vencido, None), today),
            FollowUpBadge::Vencido
        );
        assert_eq!(
            follow_up_badge(&follow(today, FollowUpStatus::Cumplido, Some(today)), today),
            FollowUpBadge::Cumplido
        );
        assert_eq!(
            follow_up_badge(&follow(date(2026, 6, 1), FollowUpStatus::Pendiente, None), today),
            FollowUpBadge::Pendiente
        );
    }
}
