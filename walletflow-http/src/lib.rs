//! walletflow-http
//!
//! HTTP implementations of `TransactionProvider`:
//! - [`CovalentProvider`]: offset pagination (`page-number`/`page-size`), credential
//!   as `key` query parameter or bearer header.
//! - [`MoralisProvider`]: cursor pagination (`cursor`/`limit`), `X-API-Key` header.
//!
//! Both map their payloads into the shared `RawTransaction` shape and expose the
//! optional transaction-details capability. [`connect`] turns an
//! [`HttpProviderConfig`] into a trait object.
#![warn(missing_docs)]

/// Transport abstraction and the production `reqwest` adapter.
pub mod adapter;
/// Provider selection from configuration or environment.
pub mod config;
/// Offset-paginated provider.
pub mod covalent;
/// Cursor-paginated provider.
pub mod moralis;

pub use adapter::{HttpGet, HttpResponse, RealAdapter};
pub use config::{HttpProviderConfig, connect};
pub use covalent::{CovalentBuilder, CovalentProvider};
pub use moralis::{MoralisBuilder, MoralisProvider, chain_slug};

use serde_json::Value;
use url::Url;
use walletflow_core::FlowError;

/// Parse and validate a base URL, dropping any trailing slash.
pub(crate) fn parse_base_url(provider: &str, raw: &str) -> Result<Url, FlowError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| FlowError::InvalidArg(format!("{provider} base url '{trimmed}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(FlowError::InvalidArg(format!(
            "{provider} base url '{trimmed}' cannot be a base"
        )));
    }
    Ok(url)
}

/// Append path segments to a base URL.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Map a non-2xx response into the error taxonomy, pulling the provider's message
/// out of `message_field` when the body is JSON.
pub(crate) fn status_error(
    provider: &'static str,
    status: u16,
    body: &str,
    message_field: &str,
) -> FlowError {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get(message_field)
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    FlowError::from_status(provider, status, message)
}

/// Decode a success body as JSON.
pub(crate) fn parse_json(provider: &'static str, body: &str) -> Result<Value, FlowError> {
    serde_json::from_str(body).map_err(|e| FlowError::malformed(provider, e.to_string()))
}
