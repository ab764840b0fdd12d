use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::numeric::scale_units;
use crate::raw::{RawTokenTransfer, RawTransaction};
use walletflow_types::{Activity, ActivityType, ChainId};

/// Decimal exponent assumed when a token transfer does not declare one.
pub const DEFAULT_DECIMALS: u32 = 18;
/// Exponent of native chain value (wei-like units).
pub const NATIVE_DECIMALS: u32 = 18;
/// Symbol used for native chain value.
pub const NATIVE_SYMBOL: &str = "NATIVE";
/// Symbol used for token transfers that carry no symbol.
pub const FALLBACK_SYMBOL: &str = "TOKEN";
/// Hash literal used when a record carries none.
pub const UNKNOWN_HASH: &str = "unknown";

/// Conservative classification: both endpoints and a value present means a transfer.
#[must_use]
pub fn classify(raw: &RawTransaction) -> ActivityType {
    let has_addresses = non_empty(raw.from_address.as_deref()) && non_empty(raw.to_address.as_deref());
    let has_value = raw.value.as_ref().is_some_and(|v| !v.is_null());
    if has_addresses && has_value {
        ActivityType::Transfer
    } else {
        ActivityType::Unknown
    }
}

/// Deterministic activity id for an API-sourced record.
#[must_use]
pub fn activity_id(chain: ChainId, tx_hash: &str) -> String {
    format!("{chain}:{tx_hash}")
}

/// Parse an instant from RFC 3339, `YYYY-MM-DD HH:MM:SS` (UTC), or Unix seconds.
#[must_use]
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    s.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

/// Normalize one raw provider record into an [`Activity`].
///
/// Pure and deterministic: the same record and chain always produce the same
/// activity. A missing or unparsable timestamp becomes the Unix epoch.
#[must_use]
pub fn normalize(raw: &RawTransaction, chain: ChainId) -> Activity {
    let tx_hash = raw
        .tx_hash
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .unwrap_or(UNKNOWN_HASH);
    let timestamp = raw
        .block_signed_at
        .as_deref()
        .and_then(parse_instant)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    let mut activity = Activity::new(
        activity_id(chain, tx_hash),
        chain,
        timestamp,
        classify(raw),
        raw.from_address.as_deref().unwrap_or_default(),
        raw.to_address.as_deref().unwrap_or_default(),
        tx_hash,
    );

    let (token, amount) = token_amount(raw);
    activity.token = token;
    activity.amount = amount;
    activity.amount_usd = usd_estimate(raw, amount);
    activity
}

/// Normalize a whole page, preserving order.
#[must_use]
pub fn normalize_page(records: &[RawTransaction], chain: ChainId) -> Vec<Activity> {
    records.iter().map(|r| normalize(r, chain)).collect()
}

fn token_amount(raw: &RawTransaction) -> (Option<String>, Option<f64>) {
    if let Some(transfer) = pick_transfer(raw) {
        let decimals = transfer.token_decimals.unwrap_or(DEFAULT_DECIMALS);
        let amount = match &transfer.value {
            Some(v) if !v.is_null() => scale_units(v, decimals),
            _ => transfer.value_decimal.or(Some(0.0)),
        };
        let symbol = transfer
            .token_symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(FALLBACK_SYMBOL);
        return (Some(symbol.to_string()), amount);
    }
    match raw.value.as_ref().filter(|v| !v.is_null()) {
        Some(v) => match scale_units(v, NATIVE_DECIMALS) {
            Some(amount) => (Some(NATIVE_SYMBOL.to_string()), Some(amount)),
            None => (None, None),
        },
        None => (None, None),
    }
}

/// The transfer whose endpoints match the record's endpoints, else the first one.
fn pick_transfer(raw: &RawTransaction) -> Option<&RawTokenTransfer> {
    let transfers = raw.erc20_transfers.as_deref()?;
    let from = raw.from_address.as_deref().unwrap_or_default();
    let to = raw.to_address.as_deref().unwrap_or_default();
    transfers
        .iter()
        .find(|t| {
            t.from_address.as_deref().unwrap_or_default().eq_ignore_ascii_case(from)
                && t.to_address.as_deref().unwrap_or_default().eq_ignore_ascii_case(to)
        })
        .or_else(|| transfers.first())
}

fn usd_estimate(raw: &RawTransaction, amount: Option<f64>) -> Option<f64> {
    if let Some(quote) = raw.value_quote {
        return Some(quote);
    }
    let rate = raw.quote_rate.or(raw.gas_quote_rate)?;
    let usd = amount? * rate;
    usd.is_finite().then_some(usd)
}

fn non_empty(s: Option<&str>) -> bool {
    s.is_some_and(|s| !s.trim().is_empty())
}
