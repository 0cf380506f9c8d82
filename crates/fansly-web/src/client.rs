//! HTTP client and configuration
//!
//! [`WebClient`] owns one `reqwest::Client` and the endpoints the fetchers
//! talk to. The request logic lives in the [`fetchers`](crate::fetchers)
//! module. The free functions here use the production defaults.

use crate::error::WebError;
use crate::types::ReleaseInfo;
use crate::{ACCOUNT_API_BASE, APP_NAME, GITHUB_API_BASE, REPOSITORY};
use std::time::Duration;
use tracing::warn;

/// Endpoint and transport options for [`WebClient`]
#[derive(Debug, Clone)]
pub struct WebOptions {
    /// Application name used in the release-check User-Agent
    pub app_name: String,
    /// Base URL of the account API
    pub account_api_base: String,
    /// Base URL of the GitHub REST API
    pub github_api_base: String,
    /// `owner/repo` whose latest release is checked
    pub repository: String,
    /// Overall request timeout; `None` leaves the client default
    pub timeout: Option<Duration>,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            account_api_base: ACCOUNT_API_BASE.to_string(),
            github_api_base: GITHUB_API_BASE.to_string(),
            repository: REPOSITORY.to_string(),
            timeout: None,
        }
    }
}

/// Builder for [`WebClient`]
#[derive(Debug, Clone, Default)]
pub struct WebClientBuilder {
    options: WebOptions,
}

impl WebClientBuilder {
    /// Create a builder with production defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set application name
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.options.app_name = name.into();
        self
    }

    /// Set account API base URL
    pub fn account_api_base(mut self, base: impl Into<String>) -> Self {
        self.options.account_api_base = base.into();
        self
    }

    /// Set GitHub API base URL
    pub fn github_api_base(mut self, base: impl Into<String>) -> Self {
        self.options.github_api_base = base.into();
        self
    }

    /// Set `owner/repo` for release checks
    pub fn repository(mut self, repository: impl Into<String>) -> Self {
        self.options.repository = repository.into();
        self
    }

    /// Set overall request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<WebClient, WebError> {
        WebClient::with_options(self.options)
    }
}

/// Client for the remote metadata endpoints
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct WebClient {
    pub(crate) http: reqwest::Client,
    pub(crate) options: WebOptions,
}

impl WebClient {
    /// Create a client with production defaults
    pub fn new() -> Result<Self, WebError> {
        Self::with_options(WebOptions::default())
    }

    /// Create a builder
    pub fn builder() -> WebClientBuilder {
        WebClientBuilder::new()
    }

    /// Create a client from options
    pub fn with_options(options: WebOptions) -> Result<Self, WebError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(WebError::ClientBuildError)?;

        Ok(Self { http, options })
    }

    /// Options this client was built with
    pub fn options(&self) -> &WebOptions {
        &self.options
    }
}

/// Fetch the account username for `auth_token` using default options
///
/// Returns `None` on any failure.
pub async fn fetch_account_identity(auth_token: &str) -> Option<String> {
    match WebClient::new() {
        Ok(client) => client.fetch_account_identity(auth_token).await,
        Err(e) => {
            warn!(error = %e, "Account lookup skipped");
            None
        }
    }
}

/// Fetch the latest release descriptor using default options
///
/// Returns `None` on any failure.
pub async fn fetch_latest_release(current_version: &str) -> Option<ReleaseInfo> {
    match WebClient::new() {
        Ok(client) => client.fetch_latest_release(current_version).await,
        Err(e) => {
            warn!(error = %e, "Release check skipped");
            None
        }
    }
}
