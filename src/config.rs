// ⚙️ Settings - Runtime configuration from the environment
// A `.env` file in the working directory is loaded first when present.

use std::env;

pub const GRAPHQL_URL: &str = "GRAPHQL_URL";
pub const PROFILE_HOST: &str = "PROFILE_HOST";
pub const BIND_ADDR: &str = "BIND_ADDR";
pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

const DEFAULT_GRAPHQL_URL: &str = "https://api.opencollective.com/graphql/v2";
const DEFAULT_PROFILE_HOST: &str = "opencollective.com";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// GraphQL endpoint queried for every dashboard
    pub graphql_url: String,

    /// Host used for collective profile links: https://<host>/<slug>
    pub profile_host: String,

    /// Address the web server listens on
    pub bind_addr: String,

    /// Timeout for one outbound GraphQL request
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            profile_host: DEFAULT_PROFILE_HOST.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load `.env` (if any), then read the process environment
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            log::debug!("No .env file loaded: {}", e);
        }
        Settings::from_env()
    }

    /// Read settings from the process environment, falling back to defaults
    pub fn from_env() -> Self {
        Settings::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup (the environment, a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let request_timeout_secs = match read(REQUEST_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    log::warn!(
                        "Ignoring invalid {}={:?}, using {}",
                        REQUEST_TIMEOUT_SECS,
                        raw,
                        defaults.request_timeout_secs
                    );
                    defaults.request_timeout_secs
                }
            },
            None => defaults.request_timeout_secs,
        };

        Settings {
            graphql_url: read(GRAPHQL_URL).unwrap_or(defaults.graphql_url),
            profile_host: read(PROFILE_HOST)
                .map(|host| host.trim_end_matches('/').to_string())
                .unwrap_or(defaults.profile_host),
            bind_addr: read(BIND_ADDR).unwrap_or(defaults.bind_addr),
            request_timeout_secs,
        }
    }

    /// Public profile URL of a collective
    pub fn profile_url(&self, slug: &str) -> String {
        format!("https://{}/{}", self.profile_host, urlencoding::encode(slug))
    }
}

// ============================================================================
// TESTS
// ============================================================================
