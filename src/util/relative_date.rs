use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use constants::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, RELATIVE_DATE_MAX_DAYS};

use super::locale::Locale;

/// Source of "now", so relative dates can be computed against a fixed instant in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Describes how long ago `timestamp` was, relative to `now`.
///
/// Anything under a minute (including timestamps in the future) is "just now";
/// past a week the calendar date of `timestamp` in local time is shown instead.
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>, locale: Locale) -> String {
    let diff_ms = (now - timestamp).num_milliseconds();
    let diff_mins = diff_ms.div_euclid(MILLIS_PER_MINUTE);
    let diff_hours = diff_ms.div_euclid(MILLIS_PER_HOUR);
    let diff_days = diff_ms.div_euclid(MILLIS_PER_DAY);

    if diff_mins < 1 {
        locale.just_now()
    } else if diff_mins < 60 {
        locale.minutes_ago(diff_mins)
    } else if diff_hours < 24 {
        locale.hours_ago(diff_hours)
    } else if diff_days < RELATIVE_DATE_MAX_DAYS {
        locale.days_ago(diff_days)
    } else {
        locale.format_calendar_date(timestamp.with_timezone(&Local).date_naive())
    }
}

/// Parses `date_string` and describes it relative to `clock`'s current time.
pub fn format_date(date_string: &str, clock: &dyn Clock, locale: Locale) -> String {
    match parse_timestamp(date_string) {
        Some(timestamp) => format_relative(timestamp, clock.now(), locale),
        None => {
            tracing::debug!("Could not parse date {date_string:?}");
            locale.invalid_date().to_string()
        }
    }
}

/// Accepts the date-time forms browsers parse: RFC 3339 and other offset-bearing
/// timestamps (`Z`, `+07:00`, `+0700`, minutes-only times), naive date-times (read
/// as local time), and bare dates, year-months and years (read as UTC midnight on
/// the first day).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f%#z",
        "%Y-%m-%d %H:%M:%S%.f%#z",
        "%Y-%m-%dT%H:%M%#z",
        "%Y-%m-%d %H:%M%#z",
    ] {
        if let Ok(dt) = DateTime::parse_from_str(s, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    parse_date_only(s)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; missing fields default to the first.
fn parse_date_only(s: &str) -> Option<NaiveDate> {
    let is_year = |y: &str| y.len() == 4 && y.bytes().all(|b| b.is_ascii_digit());

    match s.len() {
        10 => NaiveDate::parse_from_str(s, "%Y-%m-%d").ok(),
        7 => {
            let (year, month) = s.split_once('-')?;
            if !is_year(year) || month.len() != 2 {
                return None;
            }
            NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
        }
        4 if is_year(s) => NaiveDate::from_ymd_opt(s.parse().ok()?, 1, 1),
        _ => None,
    }
}
