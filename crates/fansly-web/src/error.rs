//! Error types for fansly-web

use thiserror::Error;

/// Errors surfaced by URL splitting and the remote metadata fetchers
#[derive(Debug, Error)]
pub enum WebError {
    /// URL could not be parsed as an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// URL path has no `/` to split on (e.g. `mailto:` URLs)
    #[error("URL has no path to split")]
    MissingPath,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Server answered with something other than 200 OK
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// Value cannot be sent as an HTTP header
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    DecodeError(String),
}

impl WebError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            WebError::Timeout
        } else if err.is_connect() {
            WebError::ConnectError(err)
        } else if err.is_decode() {
            WebError::DecodeError(err.to_string())
        } else {
            WebError::RequestError(err.to_string())
        }
    }
}
