// 📐 Response Schema - Typed shape of the funders query result
//
// Every nested field is optional: a missing value is rendered as a
// placeholder, never a crash. Only a missing account is fatal.

use crate::money::{Money, DEFAULT_CURRENCY};
use rust_decimal::Decimal;
use serde::Deserialize;

// ============================================================================
// ENVELOPE
// ============================================================================

/// Standard GraphQL envelope: `{ "data": ..., "errors": [...] }`
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct FundersData {
    pub account: Option<AccountNode>,
}

// ============================================================================
// ACCOUNT (the funder)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountNode {
    pub slug: String,
    pub name: Option<String>,
    pub stats: Option<AccountStats>,
    pub member_of: Option<MemberOf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub total_amount_spent: Option<AmountNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MemberOf {
    pub nodes: Option<Vec<MembershipNode>>,
}

// ============================================================================
// MEMBERSHIP EDGE (funder -> collective)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipNode {
    pub id: String,
    pub account: Option<MemberAccount>,

    /// Lifetime amount contributed through this membership
    pub total_donations: Option<AmountNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAccount {
    pub slug: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub stats: Option<MemberStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub total_amount_received_period: Option<AmountNode>,
    pub total_amount_spent_period: Option<AmountNode>,
    pub total_amount_received_previous_period: Option<AmountNode>,
    pub total_amount_spent_previous_period: Option<AmountNode>,
    pub balance: Option<AmountNode>,
    pub active_monthly_recurring_contributions: Option<AmountNode>,
    pub active_yearly_recurring_contributions: Option<AmountNode>,
}

// ============================================================================
// AMOUNT
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmountNode {
    pub value: Option<Decimal>,
    pub currency: Option<String>,
}

impl AmountNode {
    /// None when the API gave no value
    pub fn to_money(&self) -> Option<Money> {
        let amount = self.value?;
        let currency = self
            .currency
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        Some(Money::new(amount, currency))
    }
}

/// Convert an optional amount node straight to Money
pub fn money_of(node: &Option<AmountNode>) -> Option<Money> {
    node.as_ref().and_then(AmountNode::to_money)
}

// ============================================================================
// TESTS
// ============================================================================
