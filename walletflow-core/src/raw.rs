use serde::{Deserialize, Deserializer, Serialize};

/// One provider record in the shape shared by every provider dialect.
///
/// Field names follow the offset-paginated provider's payload; the cursor provider
/// maps its own items into this shape. Numeric fields accept numbers, numeric
/// strings, or `null`, so a single odd field never rejects a whole page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    /// Transaction hash.
    #[serde(default)]
    pub tx_hash: Option<String>,
    /// Block timestamp (RFC 3339).
    #[serde(default)]
    pub block_signed_at: Option<String>,
    /// Sender.
    #[serde(default)]
    pub from_address: Option<String>,
    /// Receiver.
    #[serde(default)]
    pub to_address: Option<String>,
    /// Native value in the chain's smallest unit (string or number).
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Provider-reported USD value of the transaction.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value_quote: Option<f64>,
    /// Per-unit USD rate of the native token.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub quote_rate: Option<f64>,
    /// Per-unit USD rate reported alongside gas figures.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gas_quote_rate: Option<f64>,
    /// Token transfers carried by the transaction.
    #[serde(default)]
    pub erc20_transfers: Option<Vec<RawTokenTransfer>>,
}

/// A token-transfer sub-record of a [`RawTransaction`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTokenTransfer {
    /// Token sender.
    #[serde(default)]
    pub from_address: Option<String>,
    /// Token receiver.
    #[serde(default)]
    pub to_address: Option<String>,
    /// Token symbol.
    #[serde(default)]
    pub token_symbol: Option<String>,
    /// Declared decimal exponent.
    #[serde(default, deserialize_with = "lenient_u32")]
    pub token_decimals: Option<u32>,
    /// Token contract address.
    #[serde(default)]
    pub token_address: Option<String>,
    /// Raw value in the token's smallest unit.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    /// Provider-computed decimal value, when offered.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub value_decimal: Option<f64>,
}

fn lenient_f64<'de, D>(d: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(crate::numeric::json_f64))
}

fn lenient_u32<'de, D>(d: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(v.as_ref().and_then(crate::numeric::json_u32))
}

/// Continuation token returned with a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    /// Offset-style: index of the next page.
    Page(u32),
    /// Cursor-style: opaque server token.
    Cursor(String),
}

/// Parameters for one page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Requested records per page.
    pub page_size: u32,
    /// Zero-based page index (offset-style providers).
    pub page_number: u32,
    /// Opaque cursor (cursor-style providers); `None` for the first page.
    pub cursor: Option<String>,
}

impl PageRequest {
    /// The first page.
    #[must_use]
    pub const fn first(page_size: u32) -> Self {
        Self {
            page_size,
            page_number: 0,
            cursor: None,
        }
    }

    /// The request that follows this one given a continuation.
    #[must_use]
    pub fn next(&self, continuation: &Continuation) -> Self {
        match continuation {
            Continuation::Page(n) => Self {
                page_size: self.page_size,
                page_number: *n,
                cursor: self.cursor.clone(),
            },
            Continuation::Cursor(c) => Self {
                page_size: self.page_size,
                page_number: self.page_number.saturating_add(1),
                cursor: Some(c.clone()),
            },
        }
    }
}

/// One page of raw records plus the provider's continuation, if any.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPage {
    /// Records on this page.
    pub records: Vec<RawTransaction>,
    /// Continuation to the next page.
    pub continuation: Option<Continuation>,
}

impl RawPage {
    /// Build a page.
    #[must_use]
    pub const fn new(records: Vec<RawTransaction>, continuation: Option<Continuation>) -> Self {
        Self {
            records,
            continuation,
        }
    }

    /// An empty final page.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
            continuation: None,
        }
    }

    /// More data is available iff a continuation is present and the page was full.
    #[must_use]
    pub fn has_more(&self, page_size: u32) -> bool {
        self.continuation.is_some() && self.records.len() >= page_size as usize
    }
}
