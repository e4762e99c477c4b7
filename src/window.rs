//! Time window resolution.
//!
//! Turns the operator's `--dt-from`/`--dt-to` strings into an inclusive
//! [`TimeWindow`] in local time. Each bound accepts, in order of precedence:
//!
//! - a date (`YYYY-MM-DD`), pinned to `00:00:00` for the start and `23:59:59`
//!   for the end
//! - a date-time (`YYYY-MM-DD HH:MM:SS`)
//! - a 10-digit unix timestamp
//!
//! An empty bound takes its default: start of the current day for the start,
//! the current second for the end. A bound shaped like one of the formats but
//! naming a non-existent instant (`2024-02-30`, a DST gap) falls back to the
//! same default. Anything else is rejected.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Timelike};
use log::debug;
use regex::Regex;

use crate::config::{DATETIME_FORMAT, DATE_FORMAT};
use crate::error_handling::ReportError;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));
static DATETIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").expect("valid date-time pattern")
});
static UNIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("valid timestamp pattern"));

/// Which end of the window a specification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl Bound {
    fn as_str(self) -> &'static str {
        match self {
            Bound::Start => "dt-from",
            Bound::End => "dt-to",
        }
    }

    /// Date-only specifications cover the whole day.
    fn pin(self, date: NaiveDate) -> Option<NaiveDateTime> {
        match self {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_opt(23, 59, 59),
        }
    }

    fn default_at(self, now: DateTime<Local>) -> DateTime<Local> {
        match self {
            Bound::Start => Bound::Start
                .pin(now.date_naive())
                .and_then(local_instant)
                .unwrap_or(now),
            Bound::End => now
                .with_second(0)
                .and_then(|t| t.with_nanosecond(0))
                .unwrap_or(now),
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive local-time range a segment's modification time must fall in.
///
/// `start <= end` always holds for a constructed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Local>,
    end: DateTime<Local>,
}

impl TimeWindow {
    /// Builds a window from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::InvalidRange`] when `start > end`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::InvalidRange {
                start: start.format(DATETIME_FORMAT).to_string(),
                end: end.format(DATETIME_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Resolves both specifications against the current local time.
    pub fn resolve(from_spec: &str, to_spec: &str) -> Result<Self, ReportError> {
        Self::resolve_at(from_spec, to_spec, Local::now())
    }

    /// Resolves both specifications, using `now` for the defaults.
    ///
    /// # Errors
    ///
    /// - [`ReportError::InvalidTimeSpec`] if a non-empty bound matches none of
    ///   the accepted formats
    /// - [`ReportError::InvalidRange`] if the resolved start is after the end
    pub fn resolve_at(
        from_spec: &str,
        to_spec: &str,
        now: DateTime<Local>,
    ) -> Result<Self, ReportError> {
        let start = parse_bound(from_spec, Bound::Start, now)?;
        let end = parse_bound(to_spec, Bound::End, now)?;
        debug!(
            "Resolved time window {} .. {}",
            start.format(DATETIME_FORMAT),
            end.format(DATETIME_FORMAT)
        );
        Self::new(start, end)
    }

    pub fn start(&self) -> DateTime<Local> {
        self.start
    }

    pub fn end(&self) -> DateTime<Local> {
        self.end
    }

    /// Start bound in the canonical `YYYY-MM-DD HH:MM:SS` form.
    pub fn start_display(&self) -> String {
        self.start.format(DATETIME_FORMAT).to_string()
    }

    /// End bound in the canonical `YYYY-MM-DD HH:MM:SS` form.
    pub fn end_display(&self) -> String {
        self.end.format(DATETIME_FORMAT).to_string()
    }

    /// Whether `instant` lies within the window, bounds included.
    pub fn contains(&self, instant: DateTime<Local>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start_display(), self.end_display())
    }
}

/// Parses one bound specification.
///
/// # Errors
///
/// Returns [`ReportError::InvalidTimeSpec`] when a non-empty `spec` matches
/// none of the accepted formats.
pub fn parse_bound(
    spec: &str,
    bound: Bound,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, ReportError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok(bound.default_at(now));
    }

    let parsed = if DATE_PATTERN.is_match(spec) {
        NaiveDate::parse_from_str(spec, DATE_FORMAT)
            .ok()
            .and_then(|date| bound.pin(date))
            .and_then(local_instant)
    } else if DATETIME_PATTERN.is_match(spec) {
        NaiveDateTime::parse_from_str(spec, DATETIME_FORMAT)
            .ok()
            .and_then(local_instant)
    } else if UNIX_PATTERN.is_match(spec) {
        spec.parse::<i64>()
            .ok()
            .and_then(|secs| Local.timestamp_opt(secs, 0).single())
    } else {
        return Err(ReportError::InvalidTimeSpec {
            bound: bound.as_str(),
            spec: spec.to_string(),
        });
    };

    Ok(parsed.unwrap_or_else(|| {
        debug!("{bound} value '{spec}' does not name a valid instant, using default");
        bound.default_at(now)
    }))
}

fn local_instant(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 5, 10, 14, 25, 36)
            .single()
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, h, mi, s).single().unwrap()
    }

    #[test]
    fn test_empty_bounds_use_defaults() {
        let window = TimeWindow::resolve_at("", "", now()).unwrap();
        assert_eq!(window.start(), at(2024, 5, 10, 0, 0, 0));
        // End defaults to "now" cut to the minute, not end of day.
        assert_eq!(window.end(), at(2024, 5, 10, 14, 25, 0));
    }

    #[test]
    fn test_date_only_bounds_are_pinned() {
        let window = TimeWindow::resolve_at("2024-05-01", "2024-05-03", now()).unwrap();
        assert_eq!(window.start(), at(2024, 5, 1, 0, 0, 0));
        assert_eq!(window.end(), at(2024, 5, 3, 23, 59, 59));
    }

    #[test]
    fn test_same_day_date_only_window() {
        let window = TimeWindow::resolve_at("2024-05-01", "2024-05-01", now()).unwrap();
        assert_eq!(window.start_display(), "2024-05-01 00:00:00");
        assert_eq!(window.end_display(), "2024-05-01 23:59:59");
    }

    #[test]
    fn test_datetime_bounds() {
        let window =
            TimeWindow::resolve_at("2024-05-01 08:15:00", "2024-05-01 09:00:30", now()).unwrap();
        assert_eq!(window.start(), at(2024, 5, 1, 8, 15, 0));
        assert_eq!(window.end(), at(2024, 5, 1, 9, 0, 30));
    }

    #[test]
    fn test_unix_timestamp_bounds() {
        let start = at(2024, 5, 1, 8, 0, 0);
        let end = at(2024, 5, 2, 8, 0, 0);
        let window = TimeWindow::resolve_at(
            &start.timestamp().to_string(),
            &end.timestamp().to_string(),
            now(),
        )
        .unwrap();
        assert_eq!(window.start(), start);
        assert_eq!(window.end(), end);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let window = TimeWindow::resolve_at(" 2024-05-01 ", "", now()).unwrap();
        assert_eq!(window.start(), at(2024, 5, 1, 0, 0, 0));
    }

    #[test]
    fn test_unrecognised_spec_is_rejected() {
        for spec in ["yesterday", "2024/05/01", "12345", "2024-05-01T08:00:00", "17000000000"] {
            let err = TimeWindow::resolve_at(spec, "", now()).unwrap_err();
            assert!(
                matches!(err, ReportError::InvalidTimeSpec { bound: "dt-from", .. }),
                "{spec} should be rejected, got {err:?}"
            );
        }

        let err = TimeWindow::resolve_at("", "tomorrow", now()).unwrap_err();
        assert!(matches!(
            err,
            ReportError::InvalidTimeSpec { bound: "dt-to", .. }
        ));
    }

    #[test]
    fn test_well_shaped_but_impossible_date_uses_default() {
        let window = TimeWindow::resolve_at("2024-02-30", "2024-13-01 00:00:00", now()).unwrap();
        assert_eq!(window.start(), at(2024, 5, 10, 0, 0, 0));
        assert_eq!(window.end(), at(2024, 5, 10, 14, 25, 0));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = TimeWindow::resolve_at("2024-05-02", "2024-05-01", now()).unwrap_err();
        match err {
            ReportError::InvalidRange { start, end } => {
                assert_eq!(start, "2024-05-02 00:00:00");
                assert_eq!(end, "2024-05-01 23:59:59");
            }
            other => panic!("expected InvalidRange, got {other:?}"),
        }
    }

    #[test]
    fn test_default_end_excludes_the_current_minute() {
        let window = TimeWindow::resolve_at("2024-05-10 14:25:00", "", now()).unwrap();
        assert!(window.contains(at(2024, 5, 10, 14, 25, 0)));
        assert!(!window.contains(at(2024, 5, 10, 14, 25, 1)));

        let err = TimeWindow::resolve_at("2024-05-10 14:25:30", "", now()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRange { .. }));
    }

    #[test]
    fn test_future_start_with_default_end_is_rejected() {
        let err = TimeWindow::resolve_at("2024-05-11", "", now()).unwrap_err();
        assert!(matches!(err, ReportError::InvalidRange { .. }));
    }

    #[test]
    fn test_resolved_windows_are_ordered() {
        let specs = [
            "",
            "2024-05-01",
            "2024-05-09 12:00:00",
            "2024-05-10",
            "1714000000",
            "2024-05-10 14:25:36",
        ];
        for from in specs {
            for to in specs {
                if let Ok(window) = TimeWindow::resolve_at(from, to, now()) {
                    assert!(window.start() <= window.end(), "{from} .. {to}");
                }
            }
        }
    }

    #[test]
    fn test_formats_round_trip_through_display() {
        for (spec, bound) in [
            ("2024-05-01", Bound::Start),
            ("2024-05-01", Bound::End),
            ("2024-05-01 08:15:42", Bound::Start),
            ("1714551342", Bound::End),
        ] {
            let first = parse_bound(spec, bound, now()).unwrap();
            let shown = first.format(DATETIME_FORMAT).to_string();
            let second = parse_bound(&shown, bound, now()).unwrap();
            assert_eq!(first, second, "{spec} should round-trip");
            assert_eq!(second.format(DATETIME_FORMAT).to_string(), shown);
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = TimeWindow::new(at(2024, 5, 1, 0, 0, 0), at(2024, 5, 1, 23, 59, 59)).unwrap();
        assert!(window.contains(at(2024, 5, 1, 0, 0, 0)));
        assert!(window.contains(at(2024, 5, 1, 23, 59, 59)));
        assert!(!window.contains(at(2024, 4, 30, 23, 59, 59)));
        assert!(!window.contains(at(2024, 5, 2, 0, 0, 0)));
    }
}
