//! Timeline post-processing over normalized activities.

use walletflow_types::Activity;

/// Pass-through (relay hop) collapsing.
pub mod collapse;
/// Post-merge filtering by chain, type, and USD value.
pub mod filter;
/// Inbound funder aggregation.
pub mod funders;
/// Union and deduplication of API and file records.
pub mod merge;

/// Stable sort by timestamp, newest first.
pub fn sort_timeline(items: &mut [Activity]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
