use std::collections::HashMap;

use super::sort_timeline;
use walletflow_types::Activity;

/// Reconcile API-sourced and file-sourced activities into one timeline.
///
/// Behavior:
/// - Union by `id`: API records win; a file record is only added when its id is new.
///   A later API record with an already-seen id replaces the earlier one in place.
/// - Dedup by `txHash` (the `id` when the hash is empty): of two records sharing a
///   key, the one with the strictly greater `amountUSD` is kept (absent counts as
///   lowest); on a tie the first seen stays.
/// - Result is sorted by timestamp, newest first (stable).
#[must_use]
pub fn merge(api: Vec<Activity>, file: Vec<Activity>) -> Vec<Activity> {
    let mut by_id: Vec<Activity> = Vec::with_capacity(api.len() + file.len());
    let mut id_slot: HashMap<String, usize> = HashMap::new();

    for a in api {
        if let Some(&slot) = id_slot.get(&a.id) {
            by_id[slot] = a;
        } else {
            id_slot.insert(a.id.clone(), by_id.len());
            by_id.push(a);
        }
    }
    for f in file {
        if !id_slot.contains_key(&f.id) {
            id_slot.insert(f.id.clone(), by_id.len());
            by_id.push(f);
        }
    }

    let mut out: Vec<Activity> = Vec::with_capacity(by_id.len());
    let mut hash_slot: HashMap<String, usize> = HashMap::new();
    for item in by_id {
        let key = dedup_key(&item).to_string();
        match hash_slot.get(&key) {
            Some(&slot) => {
                if usd_rank(&item) > usd_rank(&out[slot]) {
                    out[slot] = item;
                }
            }
            None => {
                hash_slot.insert(key, out.len());
                out.push(item);
            }
        }
    }

    sort_timeline(&mut out);
    out
}

fn dedup_key(a: &Activity) -> &str {
    if a.tx_hash.is_empty() { &a.id } else { &a.tx_hash }
}

fn usd_rank(a: &Activity) -> f64 {
    a.amount_usd.unwrap_or(f64::NEG_INFINITY)
}
