//! Latest-release lookup on GitHub

use crate::client::WebClient;
use crate::error::WebError;
use crate::types::ReleaseInfo;
use reqwest::header::{HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use tracing::{debug, warn};

use super::send_for_json;

impl WebClient {
    /// Release-check User-Agent: `"<app name> <version>"`
    pub fn release_user_agent(&self, current_version: &str) -> String {
        format!("{} {}", self.options.app_name, current_version)
    }

    /// Fetch the latest release descriptor of the configured repository
    pub async fn try_latest_release(
        &self,
        current_version: &str,
    ) -> Result<ReleaseInfo, WebError> {
        let url = format!(
            "{}/repos/{}/releases/latest",
            self.options.github_api_base.trim_end_matches('/'),
            self.options.repository
        );
        let user_agent = HeaderValue::from_str(&self.release_user_agent(current_version))
            .map_err(|_| WebError::InvalidHeader("user-agent".to_string()))?;

        debug!(url = %url, "Fetching latest release");
        let request = self
            .http
            .get(&url)
            .header(USER_AGENT, user_agent)
            .header(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        send_for_json(request).await
    }

    /// Fetch the latest release descriptor of the configured repository
    ///
    /// Any failure yields `None`.
    pub async fn fetch_latest_release(&self, current_version: &str) -> Option<ReleaseInfo> {
        match self.try_latest_release(current_version).await {
            Ok(info) => Some(info),
            Err(e) => {
                warn!(error = %e, "Release check failed");
                None
            }
        }
    }
}
