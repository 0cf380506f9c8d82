//! Query-string extraction
//!
//! Callers page through API results by pulling cursor tokens out of URLs,
//! and they need to tell "key absent" apart from "key present but blank".
//! [`query_value`] keeps those cases apart as a [`QueryValue`];
//! [`get_query_value`] projects it onto the plain `Option` contract.

use crate::url_parts::strip_query_and_fragment;
use url::{form_urlencoded, Url};

/// Result of looking up a single query-string key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Key does not occur in the query string
    Absent,
    /// Key occurs, but only with blank values (`?key=&...`)
    EmptyPresent,
    /// First non-blank value for the key
    Value(String),
}

/// Looks up `key` in the query string of `url`.
///
/// Blank values are skipped, so `?x=&x=2` yields `Value("2")`.
pub fn query_value(url: &str, key: &str) -> QueryValue {
    let query = match Url::parse(url) {
        Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
        Err(_) => raw_query(url).to_string(),
    };

    let mut seen = false;
    for (k, v) in form_urlencoded::parse(query.as_bytes()) {
        if k != key {
            continue;
        }
        if v.is_empty() {
            seen = true;
            continue;
        }
        return QueryValue::Value(v.into_owned());
    }

    if seen {
        QueryValue::EmptyPresent
    } else {
        QueryValue::Absent
    }
}

/// Returns the first value of `key` in the query string of `url`.
///
/// - key absent: `default`, passed through untouched
/// - key present with only blank values: `None`
/// - otherwise: the first value
pub fn get_query_value(url: &str, key: &str, default: Option<String>) -> Option<String> {
    match query_value(url, key) {
        QueryValue::Absent => default,
        QueryValue::EmptyPresent => None,
        QueryValue::Value(v) => Some(v),
    }
}

fn raw_query(raw: &str) -> &str {
    match raw.split_once('?') {
        Some((_, rest)) => strip_query_and_fragment(rest),
        None => "",
    }
}
