// Funders Dashboard - Core Library
// Exposes all modules for use in CLI, web server, and tests

pub mod config;
pub mod dashboard;
pub mod deduplication;
pub mod delta;
pub mod error;
pub mod graphql;
pub mod money;
pub mod params;
pub mod period;
pub mod projection;
pub mod render;

#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use config::Settings;
pub use dashboard::{load_dashboard, Dashboard};
pub use deduplication::{unique_by, Deduplicated};
pub use delta::{money_delta, percent_delta};
pub use error::{DashboardError, DashboardResult};
pub use graphql::{build_http_client, GraphqlClient, QueryVariables, FUNDERS_QUERY};
pub use money::{format_amount, Money};
pub use params::DashboardParams;
pub use period::{
    parse_date_interval, resolve_interval, resolve_scale, Period, PeriodWindows, Scale,
};
pub use projection::{project_memberships, recurring_estimate, MembershipRow, TargetAccount};
pub use render::{render_dashboard, NO_DATA};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
