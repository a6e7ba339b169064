// 🎛️ Dashboard Parameters - Query string of a dashboard request
// Nothing here ever fails: bad or missing values fall back to defaults.

use crate::period::{resolve_interval, resolve_scale, PeriodWindows, Scale};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OFFSET: i64 = 0;
pub const DEFAULT_LIMIT: i64 = 100;

/// Raw query parameters, kept as strings so malformed numbers don't reject
/// the request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardParams {
    /// Interval expression, e.g. "2024-01-01→2024-02-01"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,

    /// "month" or "year"; used when no period is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl DashboardParams {
    /// Pagination offset, 0 when missing, invalid or negative
    pub fn offset(&self) -> i64 {
        parse_number(&self.offset)
            .filter(|n| *n >= 0)
            .unwrap_or(DEFAULT_OFFSET)
    }

    /// Page size, 100 when missing, invalid or not positive
    pub fn limit(&self) -> i64 {
        parse_number(&self.limit)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIMIT)
    }

    /// Non-empty period expression, if any
    pub fn period_expression(&self) -> Option<&str> {
        self.period
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn scale(&self) -> Scale {
        self.scale
            .as_deref()
            .map(Scale::from_token)
            .unwrap_or_default()
    }

    /// Current and previous windows: an explicit period wins over the scale
    pub fn windows(&self, now: DateTime<Utc>) -> PeriodWindows {
        match self.period_expression() {
            Some(expression) => resolve_interval(expression),
            None => resolve_scale(self.scale(), now),
        }
    }
}

fn parse_number(value: &Option<String>) -> Option<i64> {
    value.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::Period;
    use chrono::TimeZone;

    fn params(period: Option<&str>, scale: Option<&str>, offset: Option<&str>, limit: Option<&str>) -> DashboardParams {
        DashboardParams {
            period: period.map(String::from),
            scale: scale.map(String::from),
            offset: offset.map(String::from),
            limit: limit.map(String::from),
        }
    }

    #[test]
    fn test_pagination_defaults() {
        let empty = DashboardParams::default();
        assert_eq!(empty.offset(), 0);
        assert_eq!(empty.limit(), 100);

        let invalid = params(None, None, Some("abc"), Some("-3"));
        assert_eq!(invalid.offset(), 0);
        assert_eq!(invalid.limit(), 100);

        let valid = params(None, None, Some(" 20 "), Some("50"));
        assert_eq!(valid.offset(), 20);
        assert_eq!(valid.limit(), 50);
    }

    #[test]
    fn test_period_wins_over_scale() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let p = params(Some("2024-01-01→2024-01-31"), Some("month"), None, None);

        let windows = p.windows(now);
        assert_eq!(
            windows.current,
            Period::new(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()
            )
        );
    }

    #[test]
    fn test_blank_period_uses_scale() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let p = params(Some("  "), Some("month"), None, None);

        assert_eq!(p.windows(now), resolve_scale(Scale::Month, now));
    }

    #[test]
    fn test_missing_or_unknown_scale_is_year() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let year = resolve_scale(Scale::Year, now);

        assert_eq!(DashboardParams::default().windows(now), year);
        assert_eq!(params(None, Some("decade"), None, None).windows(now), year);
    }

    #[test]
    fn test_deserialize_from_query_string_shape() {
        let json = serde_json::json!({ "period": "all→all", "limit": "10" });
        let p: DashboardParams = serde_json::from_value(json).unwrap();

        assert_eq!(p.period_expression(), Some("all→all"));
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }
}
