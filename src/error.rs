// ⚠️ Errors - Everything that can fail while building a dashboard

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    /// Network or HTTP status failure talking to the GraphQL API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a GraphQL `errors` array
    #[error("GraphQL error: {0}")]
    Upstream(String),

    /// The API answered with something that does not match the schema
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        DashboardError::MalformedResponse(err.to_string())
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;
