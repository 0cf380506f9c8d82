//! Remote metadata fetchers
//!
//! Each fetcher comes in two forms:
//! - `try_*` performs one request and surfaces every failure as a [`WebError`]
//! - `fetch_*` degrades any failure to `None` and logs a warning
//!
//! Requests are single-attempt; retry policy belongs to the caller.

mod account;
mod release;

pub use account::ACCOUNT_ME_PATH;

use crate::error::WebError;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Send a request and decode a 200 OK JSON body
async fn send_for_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, WebError> {
    let response = request.send().await.map_err(WebError::from_reqwest)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(WebError::HttpStatus(status.as_u16()));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| WebError::DecodeError(e.to_string()))
}
