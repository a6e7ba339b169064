// 📝 Funders Query - GraphQL document and its variables

use crate::period::PeriodWindows;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Memberships the account backs, with per-period totals for each collective
pub const FUNDERS_QUERY: &str = r#"
query FundersDashboard(
  $slug: String
  $dateFrom: DateTime
  $dateTo: DateTime
  $previousDateFrom: DateTime
  $previousDateTo: DateTime
  $limit: Int
  $offset: Int
) {
  account(slug: $slug) {
    slug
    name
    stats {
      totalAmountSpent {
        value
        currency
      }
    }
    memberOf(
      role: BACKER
      limit: $limit
      offset: $offset
      orderBy: { field: TOTAL_CONTRIBUTED, direction: DESC }
    ) {
      nodes {
        id
        account {
          slug
          name
          imageUrl(height: 80)
          stats {
            totalAmountReceivedPeriod: totalAmountReceived(
              dateFrom: $dateFrom
              dateTo: $dateTo
              includeChildren: true
            ) {
              value
              currency
            }
            totalAmountSpentPeriod: totalAmountSpent(
              dateFrom: $dateFrom
              dateTo: $dateTo
              includeChildren: true
            ) {
              value
              currency
            }
            totalAmountReceivedPreviousPeriod: totalAmountReceived(
              dateFrom: $previousDateFrom
              dateTo: $previousDateTo
              includeChildren: true
            ) {
              value
              currency
            }
            totalAmountSpentPreviousPeriod: totalAmountSpent(
              dateFrom: $previousDateFrom
              dateTo: $previousDateTo
              includeChildren: true
            ) {
              value
              currency
            }
            balance(includeChildren: true) {
              value
              currency
            }
            activeMonthlyRecurringContributions: activeRecurringContributionsV2(frequency: MONTHLY) {
              value
              currency
            }
            activeYearlyRecurringContributions: activeRecurringContributionsV2(frequency: YEARLY) {
              value
              currency
            }
          }
        }
        totalDonations {
          value
          currency
        }
      }
    }
  }
}
"#;

/// Variables for FUNDERS_QUERY. Unbounded dates serialize as null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    pub slug: String,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub previous_date_from: Option<DateTime<Utc>>,
    pub previous_date_to: Option<DateTime<Utc>>,
    pub limit: i64,
    pub offset: i64,
}

impl QueryVariables {
    pub fn new(slug: &str, windows: &PeriodWindows, offset: i64, limit: i64) -> Self {
        QueryVariables {
            slug: slug.to_string(),
            date_from: windows.current.start,
            date_to: windows.current.end,
            previous_date_from: windows.previous.start,
            previous_date_to: windows.previous.end,
            limit,
            offset,
        }
    }
}
