use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chain::ChainId;

/// Unified error type for the walletflow workspace.
///
/// Covers credential preconditions, provider HTTP failures, unparseable payloads,
/// and a chain-tagged wrapper so the orchestrator can attribute failures.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    /// No credential was configured; raised before any network call.
    #[error("missing credential for {provider}")]
    MissingCredential {
        /// Provider that requires the credential.
        provider: String,
    },

    /// The provider rejected the credential (HTTP 401/403).
    #[error("{provider} rejected the credential")]
    InvalidCredential {
        /// Provider that rejected the credential.
        provider: String,
    },

    /// Network failure or non-2xx response.
    #[error("{provider} request failed: {}", describe_failure(.status, .message))]
    ProviderRequestFailed {
        /// Provider that failed.
        provider: String,
        /// HTTP status code, absent for transport failures.
        status: Option<u16>,
        /// Provider-supplied message when the error body was parseable.
        message: Option<String>,
    },

    /// The provider payload could not be decoded.
    #[error("{provider} returned a malformed response: {detail}")]
    MalformedResponse {
        /// Provider that produced the payload.
        provider: String,
        /// Decoder diagnostic.
        detail: String,
    },

    /// A single provider call exceeded the configured timeout.
    #[error("{provider} timed out")]
    ProviderTimeout {
        /// Provider that timed out.
        provider: String,
    },

    /// A failure attributed to one chain's fetch.
    #[error("chain {chain_id}: {source}")]
    ChainFetch {
        /// Chain whose fetch failed.
        chain_id: ChainId,
        /// Underlying failure.
        source: Box<FlowError>,
    },

    /// The requested capability is not implemented by the provider.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label.
        capability: String,
    },

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

fn describe_failure(status: &Option<u16>, message: &Option<String>) -> String {
    match (status, message) {
        (Some(s), Some(m)) => format!("status {s}: {m}"),
        (Some(s), None) => format!("status {s}"),
        (None, Some(m)) => m.clone(),
        (None, None) => "no response".to_string(),
    }
}

impl FlowError {
    /// Helper: build a `MissingCredential` error.
    pub fn missing_credential(provider: impl Into<String>) -> Self {
        Self::MissingCredential {
            provider: provider.into(),
        }
    }

    /// Helper: build an `InvalidCredential` error.
    pub fn invalid_credential(provider: impl Into<String>) -> Self {
        Self::InvalidCredential {
            provider: provider.into(),
        }
    }

    /// Map an HTTP status (and optional provider message) to an error.
    ///
    /// 401 and 403 become `InvalidCredential`; everything else is
    /// `ProviderRequestFailed`.
    pub fn from_status(provider: impl Into<String>, status: u16, message: Option<String>) -> Self {
        match status {
            401 | 403 => Self::invalid_credential(provider),
            _ => Self::ProviderRequestFailed {
                provider: provider.into(),
                status: Some(status),
                message,
            },
        }
    }

    /// Helper: build a `ProviderRequestFailed` error for a transport failure.
    pub fn transport(provider: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ProviderRequestFailed {
            provider: provider.into(),
            status: None,
            message: Some(msg.into()),
        }
    }

    /// Helper: build a `MalformedResponse` error.
    pub fn malformed(provider: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
            detail: detail.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(provider: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            provider: provider.into(),
        }
    }

    /// Helper: build an `Unsupported` error for a capability string.
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Tag an error with the chain it belongs to. Already-tagged errors are kept as-is.
    #[must_use]
    pub fn chain(chain_id: ChainId, err: Self) -> Self {
        match err {
            e @ Self::ChainFetch { .. } => e,
            other => Self::ChainFetch {
                chain_id,
                source: Box::new(other),
            },
        }
    }

    /// The chain this failure was attributed to, if any.
    #[must_use]
    pub const fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::ChainFetch { chain_id, .. } => Some(*chain_id),
            _ => None,
        }
    }

    /// The innermost error, with chain tags stripped.
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::ChainFetch { source, .. } => source.root(),
            other => other,
        }
    }

    /// True for conditions that must abort the caller's whole request.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self.root(), Self::MissingCredential { .. })
    }
}
