//! Tabular (block-explorer CSV export) ingestion.
//!
//! Columns are located by case-insensitive prefix match against the header row, so
//! decorated headers such as `DateTime (UTC)` or `Value_IN(ETH)` resolve. Fields are
//! split with a quote-toggle rule: a `"` flips "inside quotes" and commas inside
//! quotes do not split. Escaped quotes (`""`) are not supported.

use chrono::{DateTime, Utc};

use crate::normalize::{NATIVE_SYMBOL, parse_instant};
use crate::numeric::parse_or_zero;
use walletflow_types::{Activity, ActivityType, ChainId};

/// Rows with fewer fields than this are skipped.
pub const MIN_COLUMNS: usize = 5;

/// Header prefixes tried, in order, for each logical column.
const HASH_HEADERS: &[&str] = &["Transaction Hash", "Txhash"];
const DATE_HEADERS: &[&str] = &["DateTime", "UnixTimestamp"];
const FROM_HEADERS: &[&str] = &["From"];
const TO_HEADERS: &[&str] = &["To"];
const VALUE_IN_HEADERS: &[&str] = &["Value_IN"];
const VALUE_OUT_HEADERS: &[&str] = &["Value_OUT"];
const CURRENT_VALUE_HEADERS: &[&str] = &["CurrentValue"];
const METHOD_HEADERS: &[&str] = &["Method"];

struct Columns {
    hash: Option<usize>,
    date: Option<usize>,
    from: Option<usize>,
    to: Option<usize>,
    value_in: Option<usize>,
    value_out: Option<usize>,
    current_value: Option<usize>,
    method: Option<usize>,
}

impl Columns {
    fn locate(header: &[String]) -> Self {
        let find = |prefixes: &[&str]| {
            prefixes.iter().find_map(|p| {
                let p = p.to_ascii_lowercase();
                header
                    .iter()
                    .position(|h| h.to_ascii_lowercase().starts_with(&p))
            })
        };
        Self {
            hash: find(HASH_HEADERS),
            date: find(DATE_HEADERS),
            from: find(FROM_HEADERS),
            to: find(TO_HEADERS),
            value_in: find(VALUE_IN_HEADERS),
            value_out: find(VALUE_OUT_HEADERS),
            current_value: find(CURRENT_VALUE_HEADERS),
            method: find(METHOD_HEADERS),
        }
    }
}

/// Parse a CSV export into activities for `chain`.
///
/// Never fails: rows without a hash or with fewer than five fields are skipped,
/// unparsable numbers become `0`, unparsable timestamps become the Unix epoch.
/// Ids are `csv:{chainId}:{txHash}`; `amountUSD` comes from the current-value
/// column when the export has one.
#[must_use]
pub fn import_tabular(text: &str, chain: ChainId) -> Vec<Activity> {
    let mut lines = text.lines().filter(|l| !l.is_empty());
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };
    let header: Vec<String> = split_line(header_line).iter().map(|h| strip(h)).collect();
    let cols = Columns::locate(&header);

    let mut out = Vec::new();
    for (_row, line) in lines.enumerate() {
        let fields = split_line(line);
        if fields.len() < MIN_COLUMNS {
            #[cfg(feature = "tracing")]
            tracing::debug!(row = _row + 1, fields = fields.len(), "skipping short csv row");
            continue;
        }
        let field = |idx: Option<usize>| -> String {
            idx.and_then(|i| fields.get(i)).map(|f| strip(f)).unwrap_or_default()
        };

        let tx_hash = field(cols.hash);
        if tx_hash.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(row = _row + 1, "skipping csv row without hash");
            continue;
        }

        let timestamp = parse_instant(&field(cols.date)).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let kind = classify_method(&field(cols.method));
        let mut activity = Activity::new(
            format!("csv:{chain}:{tx_hash}"),
            chain,
            timestamp,
            kind,
            &field(cols.from),
            &field(cols.to),
            tx_hash,
        );

        let value_in = parse_or_zero(&field(cols.value_in));
        let value_out = parse_or_zero(&field(cols.value_out));
        let amount = if value_in > 0.0 {
            Some(value_in)
        } else if value_out > 0.0 {
            Some(value_out)
        } else {
            None
        };
        if let Some(amount) = amount {
            activity = activity.with_amount(amount).with_token(NATIVE_SYMBOL);
        }
        if cols.current_value.is_some() {
            activity = activity.with_amount_usd(parse_or_zero(&field(cols.current_value)));
        }
        out.push(activity);
    }
    out
}

/// Map an export's method label to an activity type by keyword.
#[must_use]
pub fn classify_method(method: &str) -> ActivityType {
    let m = method.to_ascii_lowercase();
    if m.contains("transfer") {
        ActivityType::Transfer
    } else if m.contains("swap") {
        ActivityType::Swap
    } else if m.contains("mint") {
        ActivityType::Mint
    } else if m.contains("burn") {
        ActivityType::Burn
    } else if ["fulfill", "atomic", "order"].iter().any(|k| m.contains(k)) {
        ActivityType::Nft
    } else {
        ActivityType::Unknown
    }
}

fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut cur = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut cur)),
            _ => cur.push(ch),
        }
    }
    fields.push(cur);
    fields
}

fn strip(field: &str) -> String {
    field.trim_matches('"').trim().to_string()
}
