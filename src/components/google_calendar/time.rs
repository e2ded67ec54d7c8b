use super::wire::EventDateTime;
use crate::error::{remote_service_error, SyncResult};
use chrono::{DateTime, FixedOffset, NaiveDate};

/// Get event start time as DateTime.
///
/// Timed events carry an RFC 3339 `dateTime`; all-day events only a `date`,
/// which is read as midnight UTC.
pub fn parse_event_start(start: &EventDateTime) -> SyncResult<Option<DateTime<FixedOffset>>> {
    if let Some(date_time) = &start.date_time {
        let dt = DateTime::parse_from_rfc3339(date_time).map_err(|e| {
            remote_service_error(&format!("Failed to parse datetime '{}': {}", date_time, e))
        })?;
        Ok(Some(dt))
    } else if let Some(date) = &start.date {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|e| remote_service_error(&format!("Failed to parse date: {}", e)))?;
        let dt = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| remote_service_error("Failed to create datetime"))?
            .and_utc()
            .fixed_offset();
        Ok(Some(dt))
    } else {
        Ok(None)
    }
}
