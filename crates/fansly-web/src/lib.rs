//! fansly-web - web utilities for Fansly Downloader NG
//!
//! Small, independent helpers used at startup and while processing items:
//!
//! - URL decomposition: [`get_last_path_segment`], [`split_url`]
//! - Query extraction: [`get_query_value`], [`query_value`]
//! - User-agent selection: [`guess_user_agent`]
//! - Remote metadata: [`WebClient::fetch_account_identity`],
//!   [`WebClient::fetch_latest_release`]
//! - Browser opening behind the [`BrowserOpener`] port
//!
//! URL and user-agent helpers are synchronous and never fail on bad input;
//! they return sentinels instead. The fetchers are async and perform exactly
//! one request per call.

pub mod browser;
pub mod client;
mod error;
pub mod fetchers;
mod query;
mod types;
mod url_parts;
pub mod user_agent;

pub use browser::{
    open_get_started_url, open_url, open_url_after, BrowserOpener, SystemBrowser,
};
pub use client::{
    fetch_account_identity, fetch_latest_release, WebClient, WebClientBuilder, WebOptions,
};
pub use error::WebError;
pub use query::{get_query_value, query_value, QueryValue};
pub use types::ReleaseInfo;
pub use url_parts::{get_last_path_segment, split_url, SplitUrl};
pub use user_agent::{
    guess_user_agent, guess_user_agent_for, HostOs, CHROME_WINDOWS_USER_AGENT,
};

/// Application name sent with release checks
pub const APP_NAME: &str = "Fansly Downloader NG";

/// Account API base URL
pub const ACCOUNT_API_BASE: &str = "https://apiv3.fansly.com";

/// GitHub REST API base URL
pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Repository whose releases are checked
pub const REPOSITORY: &str = "prof79/fansly-downloader-ng";

/// "Getting Started" documentation page
pub const GET_STARTED_URL: &str =
    "https://github.com/prof79/fansly-downloader-ng/wiki/Getting-Started";
