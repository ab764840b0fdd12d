// Lightweight fixtures and helpers for tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use walletflow::{RawTransaction, TransactionProvider, Walletflow};

/// Wallet used across tests.
pub const WALLET: &str = "0x1111111111111111111111111111111111111111";
pub const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// A native transfer of `wei` smallest units at `ts`.
pub fn native_tx(hash: &str, ts: &str, from: &str, to: &str, wei: &str) -> RawTransaction {
    RawTransaction {
        tx_hash: Some(hash.to_string()),
        block_signed_at: Some(ts.to_string()),
        from_address: Some(from.to_string()),
        to_address: Some(to.to_string()),
        value: Some(json!(wei)),
        ..RawTransaction::default()
    }
}

/// `n` distinct records whose hashes start with `prefix`.
pub fn page_of(prefix: &str, n: usize) -> Vec<RawTransaction> {
    (0..n)
        .map(|i| {
            native_tx(
                &format!("{prefix}-{i}"),
                "2024-01-01T00:00:00Z",
                ALICE,
                WALLET,
                "1000000000000000000",
            )
        })
        .collect()
}

/// An orchestrator over `provider` without pacing, so tests do not wait.
pub fn flow(provider: Arc<dyn TransactionProvider>) -> Walletflow {
    Walletflow::builder()
        .with_provider(provider)
        .page_delay(Duration::ZERO)
        .build()
        .expect("valid config")
}
