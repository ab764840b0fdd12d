//! walletflow fetches a wallet's on-chain activity across chains and turns it into
//! one timeline.
//!
//! Overview
//! - Talks to a single [`TransactionProvider`] (HTTP implementations live in
//!   `walletflow-http`, test doubles in `walletflow-mock`).
//! - Fetches chains concurrently under a [`ConcurrencyLimiter`]; pages within a
//!   chain are sequential and paced.
//! - Absorbs per-chain failures into [`FetchResult::error`]; only a missing
//!   credential aborts a request.
//! - Normalizes raw records, merges them with imported CSV activity, and
//!   optionally collapses relay hops.
//!
//! Key behaviors and trade-offs
//! - Paging stops at the first short page, an exhausted continuation, or the page
//!   ceiling, so a wallet with a long history is truncated rather than fetched in
//!   full. Raise `max_pages` to trade request cost for completeness.
//! - Pages are never retried. A flaky chain comes back empty with its error
//!   attached instead of slowing down the others.
//! - Collapsing is a heuristic: a pass-through within the window and tolerance is
//!   folded even when the two legs are unrelated.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use walletflow::{ChainId, Walletflow};
//! use walletflow_http::{HttpProviderConfig, connect};
//!
//! let provider = connect(HttpProviderConfig::from_env()?)?;
//! let wf = Walletflow::builder()
//!     .with_provider(provider)
//!     .concurrency(3)
//!     .build()?;
//!
//! let csv = std::fs::read_to_string("export.csv")?;
//! let file = walletflow::import_tabular(&csv, ChainId::ETHEREUM);
//! let timeline = wf
//!     .timeline(&[ChainId::ETHEREUM, ChainId::POLYGON], "0xabc...", file)
//!     .await?;
//! ```
//!
//! See `demos/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod limiter;
mod pager;
mod router;

pub use core::{Walletflow, WalletflowBuilder};
pub use limiter::ConcurrencyLimiter;
pub use pager::{PagerOptions, fetch_all};
pub use router::chains::FetchOptions;

// Re-export core types for convenience
pub use walletflow_core::{
    Activity, ActivityFilter, ActivityMeta, ActivityType, AuthMode, Capability, Chain, ChainId,
    CollapseConfig, Continuation, Credential, DEFAULT_CHAINS, FetchResult, FlowError, Funder,
    PageRequest, ProviderKey, RawPage, RawTokenTransfer, RawTransaction,
    TransactionDetailsProvider, TransactionProvider, WalletflowConfig, classify, collapse,
    import_tabular, merge, normalize, normalize_address, normalize_page, top_funders,
};
