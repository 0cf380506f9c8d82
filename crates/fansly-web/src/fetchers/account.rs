//! Account lookup for an authorization token

use crate::client::WebClient;
use crate::error::WebError;
use crate::types::AccountMeResponse;
use crate::user_agent::CHROME_WINDOWS_USER_AGENT;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use tracing::{debug, warn};

use super::send_for_json;

/// Account info endpoint, relative to the account API base
pub const ACCOUNT_ME_PATH: &str = "/api/v1/account/me";

/// Query appended to the account endpoint to skip the service worker cache
const NGSW_BYPASS: &str = "ngsw-bypass=true";

/// Browser-like headers sent along with the token
const BROWSER_HEADERS: &[(&str, &str)] = &[
    ("authority", "apiv3.fansly.com"),
    ("accept", "application/json, text/plain, */*"),
    ("accept-language", "en;q=0.8,en-US;q=0.7"),
    ("origin", "https://fansly.com"),
    ("referer", "https://fansly.com/"),
    (
        "sec-ch-ua",
        "\"Not.A/Brand\";v=\"8\", \"Chromium\";v=\"114\", \"Google Chrome\";v=\"114\"",
    ),
    ("sec-ch-ua-mobile", "?0"),
    ("sec-ch-ua-platform", "\"Windows\""),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-site"),
    ("user-agent", CHROME_WINDOWS_USER_AGENT),
];

fn account_headers(auth_token: &str) -> Result<HeaderMap, WebError> {
    let mut headers = HeaderMap::with_capacity(BROWSER_HEADERS.len() + 1);
    for &(name, value) in BROWSER_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    let mut token = HeaderValue::from_str(auth_token)
        .map_err(|_| WebError::InvalidHeader("authorization".to_string()))?;
    token.set_sensitive(true);
    headers.insert(AUTHORIZATION, token);

    Ok(headers)
}

impl WebClient {
    /// Resolve the username of the account behind `auth_token`
    ///
    /// `Ok(None)` means the server answered 200 without a usable username.
    pub async fn try_account_identity(
        &self,
        auth_token: &str,
    ) -> Result<Option<String>, WebError> {
        let url = format!(
            "{}{}?{}",
            self.options.account_api_base.trim_end_matches('/'),
            ACCOUNT_ME_PATH,
            NGSW_BYPASS
        );
        let headers = account_headers(auth_token)?;

        debug!(url = %url, "Fetching account info");
        let request = self.http.get(&url).headers(headers);

        let body: AccountMeResponse = send_for_json(request).await?;
        Ok(body.into_username())
    }

    /// Resolve the username of the account behind `auth_token`
    ///
    /// Any failure yields `None`.
    pub async fn fetch_account_identity(&self, auth_token: &str) -> Option<String> {
        match self.try_account_identity(auth_token).await {
            Ok(username) => username,
            Err(e) => {
                warn!(error = %e, "Account lookup failed");
                None
            }
        }
    }
}
