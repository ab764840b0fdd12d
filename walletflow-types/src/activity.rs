//! The canonical activity record produced by every ingestion path.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;

/// Open key/value annotations attached to an activity (e.g. collapse provenance).
pub type ActivityMeta = BTreeMap<String, serde_json::Value>;

/// Coarse semantic category of an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Value moved from one address to another.
    Transfer,
    /// Token exchange.
    Swap,
    /// Token or NFT creation.
    Mint,
    /// Token destruction.
    Burn,
    /// Cross-chain bridge movement.
    Bridge,
    /// NFT marketplace activity.
    Nft,
    /// Not enough evidence to classify.
    #[default]
    Unknown,
}

impl ActivityType {
    /// Every activity type, in display order.
    pub const ALL: [Self; 7] = [
        Self::Transfer,
        Self::Swap,
        Self::Mint,
        Self::Burn,
        Self::Bridge,
        Self::Nft,
        Self::Unknown,
    ];

    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::Swap => "swap",
            Self::Mint => "mint",
            Self::Burn => "burn",
            Self::Bridge => "bridge",
            Self::Nft => "nft",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical normalized unit of on-chain behavior.
///
/// Invariants:
/// - `id` identifies the activity uniquely within a collection.
/// - `amount` is already divided by the token's decimal exponent.
/// - `amount_usd` is a best-effort estimate and may be absent even when `amount` is set.
/// - `from`/`to` are lower-case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Stable, source-qualified identifier.
    pub id: String,
    /// Chain the activity happened on.
    pub chain_id: ChainId,
    /// Absolute instant of the activity.
    pub timestamp: DateTime<Utc>,
    /// Coarse semantic category.
    #[serde(rename = "type")]
    pub kind: ActivityType,
    /// Sender address (lower-case, may be empty).
    pub from: String,
    /// Receiver address (lower-case, may be empty).
    pub to: String,
    /// Token symbol, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Decimal-normalized quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// USD estimate.
    #[serde(default, rename = "amountUSD", skip_serializing_if = "Option::is_none")]
    pub amount_usd: Option<f64>,
    /// Source transaction identifier; not unique across synthetic records.
    pub tx_hash: String,
    /// Optional annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<ActivityMeta>,
}

impl Activity {
    /// Build an activity with the mandatory fields; addresses are normalized.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        chain_id: ChainId,
        timestamp: DateTime<Utc>,
        kind: ActivityType,
        from: &str,
        to: &str,
        tx_hash: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            chain_id,
            timestamp,
            kind,
            from: normalize_address(from),
            to: normalize_address(to),
            token: None,
            amount: None,
            amount_usd: None,
            tx_hash: tx_hash.into(),
            meta: None,
        }
    }

    /// Set the token symbol.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the decimal-normalized amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the USD estimate.
    #[must_use]
    pub const fn with_amount_usd(mut self, usd: f64) -> Self {
        self.amount_usd = Some(usd);
        self
    }

    /// True when this record was synthesized by the pass-through collapser.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.meta
            .as_ref()
            .and_then(|m| m.get("collapsed"))
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// Trim and lower-case an address string.
#[must_use]
pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
