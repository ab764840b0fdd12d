use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use walletflow_types::{Activity, normalize_address};

/// Aggregated inbound flow from one sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funder {
    /// Sender address (lower-case; `unknown` when the record had none).
    pub address: String,
    /// Sum of USD estimates (records without one count as zero).
    pub usd: f64,
    /// Number of inbound records.
    pub count: usize,
}

/// Rank the senders of records received by `wallet`, by USD then count, keeping `max`.
#[must_use]
pub fn top_funders(items: &[Activity], wallet: &str, max: usize) -> Vec<Funder> {
    let wallet = normalize_address(wallet);
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut funders: Vec<Funder> = Vec::new();

    for a in items.iter().filter(|a| a.to == wallet) {
        let address = if a.from.is_empty() {
            "unknown".to_string()
        } else {
            a.from.clone()
        };
        let slot = *slots.entry(address.clone()).or_insert_with(|| {
            funders.push(Funder {
                address,
                usd: 0.0,
                count: 0,
            });
            funders.len() - 1
        });
        funders[slot].usd += a.amount_usd.unwrap_or(0.0);
        funders[slot].count += 1;
    }

    funders.sort_by(|a, b| b.usd.total_cmp(&a.usd).then(b.count.cmp(&a.count)));
    funders.truncate(max);
    funders
}
