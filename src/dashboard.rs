// 📊 Dashboard - One request's worth of data, ready to render
//
// params -> period windows -> GraphQL query -> row projection.
// Built fresh for every request and dropped after rendering.

use crate::error::DashboardResult;
use crate::graphql::{money_of, AccountNode, GraphqlClient, QueryVariables};
use crate::money::Money;
use crate::params::DashboardParams;
use crate::period::PeriodWindows;
use crate::projection::{project_memberships, MembershipRow};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// The funder's slug and display name
    pub slug: String,
    pub name: String,

    /// Total amount the funder has spent ("Amount funded")
    pub total_spent: Option<Money>,

    pub windows: PeriodWindows,

    /// Parameters the dashboard was built with (for filter links)
    pub params: DashboardParams,

    /// One row per distinct collective
    pub rows: Vec<MembershipRow>,

    /// Upstream returned at least one membership edge, even if none projected
    pub has_memberships: bool,
}

impl Dashboard {
    /// Assemble a dashboard from an already fetched account
    pub fn from_account(account: AccountNode, params: DashboardParams, windows: PeriodWindows) -> Self {
        let nodes = account.member_of.as_ref().and_then(|m| m.nodes.as_deref());
        let has_memberships = nodes.is_some_and(|n| !n.is_empty());
        let rows = nodes.map(project_memberships).unwrap_or_default();

        let total_spent = account
            .stats
            .as_ref()
            .and_then(|s| money_of(&s.total_amount_spent));

        Dashboard {
            name: account
                .name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| account.slug.clone()),
            slug: account.slug,
            total_spent,
            windows,
            params,
            rows,
            has_memberships,
        }
    }

    /// Number of distinct collectives funded
    pub fn collective_count(&self) -> usize {
        self.rows.len()
    }

    /// False only when the membership list is absent or empty
    pub fn has_data(&self) -> bool {
        self.has_memberships
    }
}

/// Resolve periods, run the query and project the result
pub async fn load_dashboard(
    client: &GraphqlClient,
    slug: &str,
    params: DashboardParams,
    now: DateTime<Utc>,
) -> DashboardResult<Dashboard> {
    let windows = params.windows(now);
    let variables = QueryVariables::new(slug, &windows, params.offset(), params.limit());

    let account = client.fetch_funders(&variables).await?;
    let dashboard = Dashboard::from_account(account, params, windows);

    log::info!(
        "Built dashboard for {} with {} collective(s)",
        dashboard.slug,
        dashboard.collective_count()
    );

    Ok(dashboard)
}

// ============================================================================
// TESTS
// ============================================================================
