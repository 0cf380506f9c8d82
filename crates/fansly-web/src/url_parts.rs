//! URL decomposition
//!
//! Splits download URLs into the pieces used for file naming and
//! deduplication. Query strings and fragments never leak into the results.

use crate::error::WebError;
use url::{Position, Url};

/// Absolute base and file URLs derived from one input URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitUrl {
    /// `file_url` without its last path segment
    pub base_url: String,
    /// `scheme://authority/path`, query and fragment dropped
    pub file_url: String,
}

/// Returns the last `/`-delimited segment of the URL's path.
///
/// Usually a file name or a directory/section name. A path ending in `/`
/// yields an empty string. The segment is returned as written in the input,
/// without percent-encoding or dot-segment removal. Never fails: input that
/// does not parse as an absolute URL is treated as a bare path reference.
pub fn get_last_path_segment(url: &str) -> String {
    let parsed = Url::parse(url).ok();
    let path = match &parsed {
        Some(parsed) => raw_path(parsed, url),
        None => strip_query_and_fragment(url),
    };

    path.rsplit('/').next().unwrap_or_default().to_string()
}

/// Splits a URL into absolute base and file URLs without query strings.
///
/// Scheme and authority come out normalized; the path is kept exactly as
/// written in the input.
///
/// ```
/// let split = fansly_web::split_url("https://my.server/some/path/interesting.txt?k1=v1").unwrap();
/// assert_eq!(split.base_url, "https://my.server/some/path");
/// assert_eq!(split.file_url, "https://my.server/some/path/interesting.txt");
/// ```
pub fn split_url(url: &str) -> Result<SplitUrl, WebError> {
    let parsed = Url::parse(url).map_err(WebError::InvalidUrl)?;

    let mut path = raw_path(&parsed, url);
    if path.is_empty() && parsed.has_authority() {
        path = "/";
    }
    let slash = path.rfind('/').ok_or(WebError::MissingPath)?;

    let origin = &parsed[..Position::BeforePath];
    Ok(SplitUrl {
        base_url: format!("{}{}", origin, &path[..slash]),
        file_url: format!("{}{}", origin, path),
    })
}

/// Path of an already validated URL, taken from the input text.
///
/// `Url` percent-encodes and resolves `.`/`..`; file naming needs the path
/// bytes the caller gave us.
fn raw_path<'a>(parsed: &'a Url, input: &'a str) -> &'a str {
    let trimmed = strip_query_and_fragment(input.trim());
    let rest = trimmed.split_once(':').map_or(trimmed, |(_, rest)| rest);

    if let Some(authority_and_path) = rest.strip_prefix("//") {
        authority_and_path
            .find('/')
            .map_or("", |i| &authority_and_path[i..])
    } else if parsed.cannot_be_a_base() {
        rest
    } else {
        // Unusual spellings like `https:host/x`; trust the parser
        parsed.path()
    }
}

/// Everything before the first `?` or `#`
pub(crate) fn strip_query_and_fragment(raw: &str) -> &str {
    raw.split(['?', '#']).next().unwrap_or_default()
}
