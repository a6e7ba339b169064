// ⏰ Period Resolver - Current period vs previous period
// Every window is expressed in UTC
//
// Two ways to ask for a window:
// 1. Scale: "month" or "year", relative to now
// 2. Interval: free-form "FROM→TO" expression (e.g. "2024-01-01→2024-02-01")

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator between the two bounds of an interval expression
pub const INTERVAL_SEPARATOR: char = '→';

// ============================================================================
// SCALE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    /// Calendar month
    Month,

    /// Calendar year (default)
    #[default]
    Year,
}

impl Scale {
    /// Parse a scale token. Anything unrecognized falls back to `Year`.
    pub fn from_token(token: &str) -> Scale {
        match token.trim().to_ascii_lowercase().as_str() {
            "month" => Scale::Month,
            _ => Scale::Year,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Month => "month",
            Scale::Year => "year",
        }
    }

    fn months(&self) -> Months {
        match self {
            Scale::Month => Months::new(1),
            Scale::Year => Months::new(12),
        }
    }

    /// Midnight UTC on the first day of the unit containing `now`
    fn start_of_unit(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        let today = now.date_naive();
        let first = match self {
            Scale::Month => today.with_day(1),
            Scale::Year => today.with_ordinal(1),
        };
        first.unwrap_or(today).and_time(NaiveTime::MIN).and_utc()
    }
}

// ============================================================================
// PERIOD
// ============================================================================

/// A bounded time interval. A missing bound means unbounded ("all").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Period {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Period {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Period {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Period with no bounds on either side
    pub fn unbounded() -> Self {
        Period::default()
    }

    /// Length of the period, None when a bound is missing
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    /// start <= end whenever both bounds exist
    pub fn is_well_formed(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= end,
            _ => true,
        }
    }

    /// Move both bounds back by `offset`
    pub fn shifted_back(&self, offset: Duration) -> Period {
        Period {
            start: self.start.map(|s| s - offset),
            end: self.end.map(|e| e - offset),
        }
    }
}

/// The window being reported on, and the equal-length window right before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodWindows {
    pub current: Period,
    pub previous: Period,
}

// ============================================================================
// RESOLVERS
// ============================================================================

/// Resolve a scale relative to `now`.
///
/// The current window ends at the start of the running unit and spans one
/// calendar unit. The previous window ends where the current one starts and
/// has exactly the same duration.
pub fn resolve_scale(scale: Scale, now: DateTime<Utc>) -> PeriodWindows {
    let end = scale.start_of_unit(now);
    let start = end
        .date_naive()
        .checked_sub_months(scale.months())
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .unwrap_or(end);

    let length = end - start;
    PeriodWindows {
        current: Period::new(start, end),
        previous: Period::new(start - length, start),
    }
}

/// Resolve a free-form interval expression.
///
/// The previous window is the current one shifted back by its length in
/// whole days. A zero-day or open-ended interval has no earlier window to
/// compare against, so the previous window is the current one.
pub fn resolve_interval(expression: &str) -> PeriodWindows {
    let current = parse_date_interval(expression);

    let previous = match current.duration().map(|d| d.num_days()) {
        Some(days) if days > 0 => current.shifted_back(Duration::days(days)),
        _ => current,
    };

    PeriodWindows { current, previous }
}

/// Parse "FROM→TO" into a Period.
///
/// Each bound is `all` (or empty) for unbounded, an RFC 3339 instant, or a
/// `YYYY-MM-DD` date at midnight UTC. "->" works as an ASCII separator and a
/// trailing "~UTC" marker is accepted. Unparseable input yields an unbounded
/// period; reversed bounds are put back in order.
pub fn parse_date_interval(expression: &str) -> Period {
    let expression = expression.trim();
    let expression = expression.strip_suffix("~UTC").unwrap_or(expression);

    let bounds = expression
        .split_once(INTERVAL_SEPARATOR)
        .or_else(|| expression.split_once("->"));

    let Some((from, to)) = bounds else {
        return Period::unbounded();
    };

    let mut period = Period {
        start: parse_bound(from),
        end: parse_bound(to),
    };

    if let (Some(start), Some(end)) = (period.start, period.end) {
        if start > end {
            period = Period::new(end, start);
        }
    }

    period
}

fn parse_bound(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case("all") {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

// ============================================================================
// TESTS
// ============================================================================
