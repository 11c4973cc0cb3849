use chrono::{DateTime, Datelike, Duration, SecondsFormat, TimeZone, Utc};

use crate::config::RangeParams;
use crate::error::{AppError, Result};
use metron_core::TimeRange;

/// Resolve a display range. Metering periods are calendar months in UTC,
/// so the named ranges are anchored there too and `thismonth` is the
/// default for the quota dashboard.
pub fn resolve_range(params: &RangeParams) -> Result<TimeRange> {
    if let (Some(start), Some(end)) = (params.start.clone(), params.end.clone()) {
        let start = normalize_rfc3339_to_utc(&start)?;
        let end = normalize_rfc3339_to_utc(&end)?;
        return Ok(TimeRange { start, end });
    }
    if let Some(start) = params.start.clone() {
        let start = normalize_rfc3339_to_utc(&start)?;
        let end = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        return Ok(TimeRange { start, end });
    }
    let now = Utc::now();
    let (start, end) = match params.range.as_deref().unwrap_or("thismonth") {
        "today" => (
            utc_date(now.year(), now.month(), now.day())?,
            now,
        ),
        "last7days" => (now - Duration::days(7), now),
        "thismonth" => (month_start(now.year(), now.month())?, now),
        "lastmonth" => {
            let (year, month) = previous_month(now.year(), now.month());
            (month_start(year, month)?, month_start(now.year(), now.month())?)
        }
        "alltime" => (month_start(1970, 1)?, now),
        value => {
            return Err(AppError::InvalidInput(format!(
                "unsupported range {}",
                value
            )));
        }
    };
    Ok(TimeRange {
        start: start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end: end.to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

pub fn normalize_rfc3339_to_utc(value: &str) -> Result<String> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map_err(|err| AppError::InvalidInput(format!("invalid datetime: {}", err)))?;
    Ok(parsed
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 { (year - 1, 12) } else { (year, month - 1) }
}

fn month_start(year: i32, month: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InvalidInput("invalid date".to_string()))
}

fn utc_date(year: i32, month: u32, day: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InvalidInput("invalid date".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn explicit_bounds_are_normalized_to_utc() {
        let range = resolve_range(&RangeParams {
            range: None,
            start: Some("2026-08-01T03:00:00+03:00".to_string()),
            end: Some("2026-08-07T00:00:00Z".to_string()),
        })
        .expect("range");
        assert_eq!(range.start, "2026-08-01T00:00:00.000Z");
        assert_eq!(range.end, "2026-08-07T00:00:00.000Z");
    }

    #[test]
    fn lastmonth_spans_exactly_one_month() {
        let range = resolve_range(&RangeParams {
            range: Some("lastmonth".to_string()),
            start: None,
            end: None,
        })
        .expect("range");
        let start = DateTime::parse_from_rfc3339(&range.start).expect("start");
        let end = DateTime::parse_from_rfc3339(&range.end).expect("end");
        assert_eq!(start.day(), 1);
        assert_eq!(end.day(), 1);
        assert!(start < end);
    }

    #[test]
    fn unknown_range_is_invalid_input() {
        let err = resolve_range(&RangeParams {
            range: Some("fortnight".to_string()),
            start: None,
            end: None,
        })
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[test]
    fn previous_month_wraps_the_year() {
        assert_eq!(previous_month(2026, 1), (2025, 12));
        assert_eq!(previous_month(2026, 8), (2026, 7));
    }
}
