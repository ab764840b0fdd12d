//! walletflow-core
//!
//! Core types, traits, and utilities shared across the walletflow ecosystem.
//!
//! - `types`: canonical data structures (activities, chains, configuration, errors).
//! - `connector`: the `TransactionProvider` trait and optional capability traits.
//! - `raw`: the provider-neutral raw record shape and page envelopes.
//! - `normalize`: classification and normalization of raw records into activities.
//! - `import`: the tabular (CSV export) ingestion path.
//! - `timeline`: merge/dedup, pass-through collapsing, filtering, and funder ranking.
//!
//! Everything except the provider traits is synchronous and allocation-only; no
//! function in this crate performs I/O.
#![warn(missing_docs)]

/// Provider capability traits and the primary `TransactionProvider` interface.
pub mod connector;
/// CSV export ingestion.
pub mod import;
/// Classification and normalization of raw provider records.
pub mod normalize;
/// Tolerant numeric coercion shared by the normalizer and the importer.
pub mod numeric;
/// Provider-neutral raw records and pagination envelopes.
pub mod raw;
/// Timeline utilities: merge, collapse, filter, funders.
pub mod timeline;
pub mod types;

pub use connector::{TransactionDetailsProvider, TransactionProvider};
pub use import::import_tabular;
pub use normalize::{classify, normalize, normalize_page};
pub use raw::{Continuation, PageRequest, RawPage, RawTokenTransfer, RawTransaction};
pub use timeline::collapse::collapse;
pub use timeline::filter::ActivityFilter;
pub use timeline::funders::{Funder, top_funders};
pub use timeline::merge::merge;
pub use types::*;
