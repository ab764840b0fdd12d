//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::chain::ChainId;
use crate::error::FlowError;

/// Per-chain outcome of a multi-chain fetch.
///
/// Always present, even when the chain failed entirely: `items` is then empty and
/// `error` carries the absorbed failure, so aggregation never branches on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult<T> {
    /// Chain the items belong to.
    pub chain_id: ChainId,
    /// Records fetched for the chain.
    pub items: Vec<T>,
    /// Failure absorbed while fetching this chain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<FlowError>,
}

impl<T> FetchResult<T> {
    /// Successful outcome.
    #[must_use]
    pub const fn ok(chain_id: ChainId, items: Vec<T>) -> Self {
        Self {
            chain_id,
            items,
            error: None,
        }
    }

    /// Recovered-empty outcome for a failed chain.
    #[must_use]
    pub const fn failed(chain_id: ChainId, error: FlowError) -> Self {
        Self {
            chain_id,
            items: Vec::new(),
            error: Some(error),
        }
    }

    /// True when the chain was fetched without failure.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Transform the items, keeping chain and error.
    pub fn map_items<U>(self, f: impl FnOnce(ChainId, Vec<T>) -> Vec<U>) -> FetchResult<U> {
        FetchResult {
            chain_id: self.chain_id,
            items: f(self.chain_id, self.items),
            error: self.error,
        }
    }
}
