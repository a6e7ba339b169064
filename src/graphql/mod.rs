// 🌐 GraphQL Client - One outbound query per dashboard request
//
// The underlying reqwest::Client (connection pool) is shared; a GraphqlClient
// is built per request so the caller's credentials never leak across requests.

pub mod query;
pub mod response;

use crate::config::Settings;
use crate::error::{DashboardError, DashboardResult};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub use query::{QueryVariables, FUNDERS_QUERY};
pub use response::{
    money_of, AccountNode, AccountStats, AmountNode, FundersData, GraphqlError, GraphqlResponse,
    MemberAccount, MemberOf, MemberStats, MembershipNode,
};

/// Build the shared HTTP client used for every outbound query
pub fn build_http_client(settings: &Settings) -> DashboardResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.request_timeout_secs))
        .user_agent(concat!("funders-dashboard/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .build()
        .map_err(|e| DashboardError::Config(format!("cannot build HTTP client: {}", e)))
}

#[derive(Serialize)]
struct GraphqlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

// ============================================================================
// CLIENT
// ============================================================================

#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    endpoint: String,
    authorization: Option<String>,
}

impl GraphqlClient {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        GraphqlClient {
            http,
            endpoint: endpoint.into(),
            authorization: None,
        }
    }

    /// Forward the caller's Authorization header value
    pub fn with_authorization(mut self, authorization: Option<String>) -> Self {
        self.authorization = authorization.filter(|v| !v.is_empty());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    /// POST a query and decode `data`. A non-empty `errors` array fails.
    pub async fn query<V, T>(&self, query: &str, variables: &V) -> DashboardResult<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&GraphqlRequest { query, variables });

        if let Some(authorization) = &self.authorization {
            request = request.header(AUTHORIZATION, authorization.as_str());
        }

        let body = request.send().await?.error_for_status()?.bytes().await?;
        let response: GraphqlResponse<T> = serde_json::from_slice(&body)?;

        if !response.errors.is_empty() {
            let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();
            return Err(DashboardError::Upstream(messages.join("; ")));
        }

        response
            .data
            .ok_or_else(|| DashboardError::MalformedResponse("response has no data".to_string()))
    }

    /// Run FUNDERS_QUERY. A null account is fatal for the request.
    pub async fn fetch_funders(&self, variables: &QueryVariables) -> DashboardResult<AccountNode> {
        log::debug!(
            "Querying {} for account {} (limit {}, offset {})",
            self.endpoint,
            variables.slug,
            variables.limit,
            variables.offset
        );

        let data: FundersData = self.query(FUNDERS_QUERY, variables).await?;
        data.account
            .ok_or_else(|| DashboardError::AccountNotFound(variables.slug.clone()))
    }
}
