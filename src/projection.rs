// 🧮 Row Projection - Membership edges -> dashboard rows
//
// One row per target account (first edge wins), each carrying lifetime
// contribution, period received/spent (with previous period for deltas),
// a monthly-equivalent recurring estimate and the current balance.

use crate::deduplication::unique_by;
use crate::delta::money_delta;
use crate::graphql::{money_of, MembershipNode};
use crate::money::{round_half_up, Money, DEFAULT_CURRENCY};
use rust_decimal::Decimal;
use serde::Serialize;

// ============================================================================
// ROW TYPES
// ============================================================================

/// The collective being funded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetAccount {
    /// Opaque identifier (dedup key)
    pub slug: String,

    pub name: String,

    /// Avatar URL, if the collective has one
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipRow {
    /// Id of the membership edge this row came from
    pub membership_id: String,

    pub account: TargetAccount,

    /// Contributed to date
    pub contributed: Option<Money>,

    /// Received in the current / previous period
    pub received: Option<Money>,
    pub received_previous: Option<Money>,

    /// Spent in the current / previous period
    pub spent: Option<Money>,
    pub spent_previous: Option<Money>,

    /// Monthly-equivalent recurring contributions
    pub recurring: Option<Money>,

    pub balance: Option<Money>,
}

impl MembershipRow {
    pub fn received_delta(&self) -> Option<String> {
        delta_of(&self.received_previous, &self.received)
    }

    pub fn spent_delta(&self) -> Option<String> {
        delta_of(&self.spent_previous, &self.spent)
    }
}

fn delta_of(previous: &Option<Money>, current: &Option<Money>) -> Option<String> {
    match (previous, current) {
        (Some(previous), Some(current)) => money_delta(previous, current),
        _ => None,
    }
}

// ============================================================================
// PROJECTION
// ============================================================================

/// Project raw membership edges into rows, one per target account.
///
/// Edges without a target account cannot be displayed and are skipped.
pub fn project_memberships(nodes: &[MembershipNode]) -> Vec<MembershipRow> {
    let unique = unique_by(
        nodes.iter().filter(|node| match &node.account {
            Some(account) => !account.slug.is_empty(),
            None => {
                log::warn!("Skipping membership {} without a target account", node.id);
                false
            }
        }),
        |node| node.account.as_ref().map(|a| a.slug.clone()),
    );

    if unique.dropped > 0 {
        log::debug!("Dropped {} duplicate membership(s)", unique.dropped);
    }

    unique.items.into_iter().filter_map(project_row).collect()
}

fn project_row(node: &MembershipNode) -> Option<MembershipRow> {
    let account = node.account.as_ref()?;

    let mut row = MembershipRow {
        membership_id: node.id.clone(),
        account: TargetAccount {
            slug: account.slug.clone(),
            name: account
                .name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| account.slug.clone()),
            image_url: account.image_url.clone(),
        },
        contributed: money_of(&node.total_donations),
        received: None,
        received_previous: None,
        spent: None,
        spent_previous: None,
        recurring: None,
        balance: None,
    };

    if let Some(stats) = &account.stats {
        row.received = money_of(&stats.total_amount_received_period);
        row.received_previous = money_of(&stats.total_amount_received_previous_period);
        row.spent = money_of(&stats.total_amount_spent_period);
        row.spent_previous = money_of(&stats.total_amount_spent_previous_period);
        row.balance = money_of(&stats.balance);

        let fallback_currency = [&row.balance, &row.received, &row.contributed]
            .into_iter()
            .flatten()
            .map(|m| m.currency.clone())
            .next()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        row.recurring = Some(recurring_estimate(
            money_of(&stats.active_monthly_recurring_contributions),
            money_of(&stats.active_yearly_recurring_contributions),
            &fallback_currency,
        ));
    }

    Some(row)
}

/// Monthly-equivalent recurring contributions.
///
/// monthly + round(yearly / 12), halves rounded up. This is an approximation
/// meant for monthly views; a yearly view would want yearly + monthly * 12
/// instead, which is not computed here.
pub fn recurring_estimate(
    monthly: Option<Money>,
    yearly: Option<Money>,
    fallback_currency: &str,
) -> Money {
    let base_currency = yearly
        .as_ref()
        .map(|y| y.currency.as_str())
        .unwrap_or(fallback_currency);
    let mut estimate = monthly.unwrap_or_else(|| Money::zero(base_currency));

    if let Some(yearly) = yearly {
        if !estimate.same_currency(&yearly) {
            log::warn!(
                "Ignoring yearly recurring contributions in {} for a {} estimate",
                yearly.currency,
                estimate.currency
            );
            return estimate;
        }

        let monthly_share = yearly
            .amount
            .checked_div(Decimal::from(12))
            .and_then(round_half_up)
            .map(|amount| Money::new(amount, yearly.currency.clone()));

        match monthly_share.and_then(|share| estimate.checked_add(&share)) {
            Some(total) => estimate = total,
            None => log::warn!(
                "Recurring estimate out of range ({} {} monthly, {} yearly), keeping the monthly figure",
                estimate.amount,
                estimate.currency,
                yearly.amount
            ),
        }
    }

    estimate
}

// ============================================================================
// TESTS
// ============================================================================
