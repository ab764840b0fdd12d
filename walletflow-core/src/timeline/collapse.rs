use std::collections::HashMap;

use chrono::TimeDelta;
use serde_json::json;

use super::sort_timeline;
use walletflow_types::{Activity, ActivityMeta, ActivityType, CollapseConfig};

/// Fold relay hops (A→X followed shortly by X→B) into single synthetic transfers.
///
/// Only `transfer` records take part. Inbound legs are visited earliest first; for
/// each, the earliest unconsumed outbound leg from the same intermediary that
///
/// - is on the same chain,
/// - starts within `[t_in, t_in + window]`,
/// - carries the same token when both legs declare one,
/// - moves a comparable amount (`|a - b| <= max(a, b) * tolerance`, comparing token
///   amounts when both legs have one, USD estimates otherwise)
///
/// is paired with it. Each record is consumed at most once. Unpaired records pass
/// through unchanged; the result is sorted newest first. A best-effort heuristic:
/// false positives and false negatives are expected.
#[must_use]
pub fn collapse(items: &[Activity], config: &CollapseConfig) -> Vec<Activity> {
    let window = TimeDelta::from_std(config.window).unwrap_or(TimeDelta::MAX);
    let tolerance = config.amount_tolerance.max(0.0);

    let mut order: Vec<usize> = (0..items.len())
        .filter(|&i| items[i].kind == ActivityType::Transfer)
        .collect();
    order.sort_by_key(|&i| items[i].timestamp);

    let mut outbound_by_sender: HashMap<&str, Vec<usize>> = HashMap::new();
    for &i in &order {
        let from = items[i].from.as_str();
        if !from.is_empty() {
            outbound_by_sender.entry(from).or_default().push(i);
        }
    }

    let mut consumed = vec![false; items.len()];
    let mut out = Vec::new();

    for &i in &order {
        if consumed[i] {
            continue;
        }
        let inbound = &items[i];
        let via = inbound.to.as_str();
        if via.is_empty() {
            continue;
        }
        let Some(candidates) = outbound_by_sender.get(via) else {
            continue;
        };

        let mut matched = None;
        for &j in candidates {
            if j == i || consumed[j] {
                continue;
            }
            let outbound = &items[j];
            let dt = outbound.timestamp - inbound.timestamp;
            if dt < TimeDelta::zero() {
                continue;
            }
            if dt > window {
                break;
            }
            if is_pass_through(inbound, outbound, tolerance) {
                matched = Some(j);
                break;
            }
        }

        if let Some(j) = matched {
            consumed[i] = true;
            consumed[j] = true;
            out.push(synthesize(inbound, &items[j]));
        }
    }

    out.extend(
        items
            .iter()
            .zip(&consumed)
            .filter(|(_, used)| !**used)
            .map(|(a, _)| a.clone()),
    );
    sort_timeline(&mut out);
    out
}

fn is_pass_through(inbound: &Activity, outbound: &Activity, tolerance: f64) -> bool {
    if inbound.chain_id != outbound.chain_id {
        return false;
    }
    if let (Some(a), Some(b)) = (&inbound.token, &outbound.token) {
        if a != b {
            return false;
        }
    }
    match (inbound.amount, outbound.amount) {
        (Some(a), Some(b)) => within(a, b, tolerance),
        _ => match (inbound.amount_usd, outbound.amount_usd) {
            (Some(a), Some(b)) => within(a, b, tolerance),
            _ => false,
        },
    }
}

fn within(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= a.max(b) * tolerance
}

fn min_present(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

fn synthesize(inbound: &Activity, outbound: &Activity) -> Activity {
    let mut meta = ActivityMeta::new();
    meta.insert("collapsed".into(), json!(true));
    meta.insert("via".into(), json!(inbound.to));
    meta.insert("inId".into(), json!(inbound.id));
    meta.insert("outId".into(), json!(outbound.id));

    Activity {
        id: format!("collapsed:{}>{}", inbound.id, outbound.id),
        chain_id: inbound.chain_id,
        timestamp: outbound.timestamp,
        kind: ActivityType::Transfer,
        from: inbound.from.clone(),
        to: outbound.to.clone(),
        token: inbound.token.clone().or_else(|| outbound.token.clone()),
        amount: min_present(inbound.amount, outbound.amount),
        amount_usd: min_present(inbound.amount_usd, outbound.amount_usd),
        tx_hash: outbound.tx_hash.clone(),
        meta: Some(meta),
    }
}
