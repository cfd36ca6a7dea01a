//! Utility functions

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = if local.chars().count() <= 2 { 1 } else { 2 };
        let prefix: String = local.chars().take(keep).collect();
        format!("{}***{}", prefix, domain)
    } else {
        "***".to_string()
    }
}

/// Trims a form value and maps blank input to `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Calendar date on the server clock. Every "today" and every date filter
/// is resolved against this zone, never the database session's.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Instant at which `date` begins on the server clock.
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    day_start_in(&Local, date)
}

pub fn day_start_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|t| t.with_timezone(&Utc))
        // midnight skipped by a DST jump
        .unwrap_or_else(|| Utc.from_utc_datetime(&midnight))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("admin@guiargo.mx"), "ad***@guiargo.mx");
        assert_eq!(mask_email("jo@guiargo.mx"), "j***@guiargo.mx");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_day_start_follows_zone_offset() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let mexico = chrono::FixedOffset::west_opt(6 * 3600).unwrap();

        assert_eq!(day_start_in(&Utc, date).to_rfc3339(), "2026-03-09T00:00:00+00:00");
        assert_eq!(day_start_in(&mexico, date).to_rfc3339(), "2026-03-09T06:00:00+00:00");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  Monterrey ")), Some("Monterrey".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
