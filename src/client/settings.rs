//! Connection settings for the remote triangle service.

use crate::errors::{ProbeError, ProbeResult};
use std::time::Duration;
use url::Url;

/// Header carrying the personal token.
pub const DEFAULT_AUTH_HEADER: &str = "X-User";

/// Environment variable holding the service base URL.
pub const URL_ENV: &str = "TRIANGLE_API_URL";

/// Environment variable holding the personal token.
pub const TOKEN_ENV: &str = "TRIANGLE_API_TOKEN";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Explicit configuration threaded into [`crate::client::api::TriangleClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL of the triangle resource, always ending in `/`
    pub base_url: Url,
    /// Personal token sent with every request
    pub token: String,
    /// Name of the header carrying the token
    pub auth_header: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Creates a configuration with the default header and timeout.
    ///
    /// A trailing `/` is appended to the base URL path when missing, so that
    /// resource IDs join beneath it.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] if the URL does not parse,
    /// is not `http`/`https`, or the token is empty.
    pub fn new(base_url: &str, token: impl Into<String>) -> ProbeResult<Self> {
        let mut url = Url::parse(base_url).map_err(|e| {
            ProbeError::InvalidParameters(format!("invalid base URL '{base_url}': {e}"))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ProbeError::InvalidParameters(format!(
                    "unsupported URL scheme '{scheme}'"
                )));
            }
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        let token = token.into();
        if token.trim().is_empty() {
            return Err(ProbeError::InvalidParameters(
                "token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: url,
            token,
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Reads [`URL_ENV`] and [`TOKEN_ENV`] from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::InvalidParameters`] if either variable is
    /// missing or invalid.
    pub fn from_env() -> ProbeResult<Self> {
        let read = |name: &str| {
            std::env::var(name).map_err(|e| {
                ProbeError::InvalidParameters(format!("environment variable {name}: {e}"))
            })
        };
        Self::new(&read(URL_ENV)?, read(TOKEN_ENV)?)
    }

    /// Replaces the token header name.
    #[must_use]
    pub fn with_auth_header(mut self, header: impl Into<String>) -> Self {
        self.auth_header = header.into();
        self
    }

    /// Replaces the token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    /// Replaces the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
