//! Client configuration.

use std::time::Duration;

use sowat_core::error::InvalidInputError;
use sowat_core::{ApiUrl, DEFAULT_API_URL, LOGIN_ROUTE, Result};

/// Environment variable holding the backend base URL.
pub const API_URL_ENV: &str = "SOWAT_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "SOWAT_API_TIMEOUT_SECS";

/// Settings for an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are resolved below it.
    pub base_url: ApiUrl,
    /// Route handed to the navigator when the session is terminated.
    pub login_route: String,
    /// Whole-request timeout. `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for the given backend with default settings.
    pub fn new(base_url: ApiUrl) -> Self {
        Self {
            base_url,
            login_route: LOGIN_ROUTE.to_string(),
            timeout: None,
            user_agent: concat!("sowat-http/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Read `SOWAT_API_URL` and `SOWAT_API_TIMEOUT_SECS`, falling back to the
    /// local development backend.
    pub fn from_env() -> Result<Self> {
        let base = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let timeout = std::env::var(TIMEOUT_ENV).ok();
        Self::from_values(&base, timeout.as_deref())
    }

    fn from_values(base: &str, timeout_secs: Option<&str>) -> Result<Self> {
        let mut config = Self::new(ApiUrl::new(base)?);

        if let Some(raw) = timeout_secs {
            let secs: u64 = raw.trim().parse().map_err(|_| InvalidInputError::Other {
                message: format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw),
            })?;
            if secs == 0 {
                return Err(InvalidInputError::Other {
                    message: format!("{} must be at least 1 second", TIMEOUT_ENV),
                }
                .into());
            }
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_login_route(mut self, route: impl Into<String>) -> Self {
        self.login_route = route.into();
        self
    }
}
