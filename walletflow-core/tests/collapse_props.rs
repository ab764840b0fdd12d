use std::collections::HashSet;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use walletflow_core::{Activity, ActivityType, ChainId, CollapseConfig, collapse};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

fn transfer(id: &str, from: &str, to: &str, secs: i64, amount: f64) -> Activity {
    Activity::new(
        id,
        ChainId::ETHEREUM,
        at(secs),
        ActivityType::Transfer,
        from,
        to,
        format!("0x{id}"),
    )
    .with_token("NATIVE")
    .with_amount(amount)
}

#[test]
fn relay_hop_collapses_into_one_transfer() {
    let inbound = transfer("in", "0xA", "0xX", 0, 100.0);
    let outbound = transfer("out", "0xX", "0xB", 5 * 60, 99.5);
    let out = collapse(&[inbound, outbound], &CollapseConfig::default());

    assert_eq!(out.len(), 1);
    let c = &out[0];
    assert_eq!(c.id, "collapsed:in>out");
    assert_eq!(c.from, "0xa");
    assert_eq!(c.to, "0xb");
    assert_eq!(c.amount, Some(99.5));
    assert_eq!(c.timestamp, at(5 * 60));
    assert_eq!(c.tx_hash, "0xout");
    assert!(c.is_collapsed());
    let meta = c.meta.as_ref().unwrap();
    assert_eq!(meta["via"], "0xx");
    assert_eq!(meta["inId"], "in");
    assert_eq!(meta["outId"], "out");
}

#[test]
fn outside_window_or_tolerance_is_left_alone() {
    let late = [
        transfer("in", "0xa", "0xx", 0, 100.0),
        transfer("out", "0xx", "0xb", 61 * 60, 100.0),
    ];
    assert_eq!(collapse(&late, &CollapseConfig::default()).len(), 2);

    let far = [
        transfer("in", "0xa", "0xx", 0, 100.0),
        transfer("out", "0xx", "0xb", 60, 90.0),
    ];
    assert_eq!(collapse(&far, &CollapseConfig::default()).len(), 2);

    let before = [
        transfer("in", "0xa", "0xx", 600, 100.0),
        transfer("out", "0xx", "0xb", 0, 100.0),
    ];
    assert_eq!(collapse(&before, &CollapseConfig::default()).len(), 2);
}

#[test]
fn different_chain_or_token_never_pairs() {
    let mut other_chain = transfer("out", "0xx", "0xb", 60, 100.0);
    other_chain.chain_id = ChainId::POLYGON;
    let items = [transfer("in", "0xa", "0xx", 0, 100.0), other_chain];
    assert_eq!(collapse(&items, &CollapseConfig::default()).len(), 2);

    let items = [
        transfer("in", "0xa", "0xx", 0, 100.0),
        transfer("out", "0xx", "0xb", 60, 100.0).with_token("USDC"),
    ];
    assert_eq!(collapse(&items, &CollapseConfig::default()).len(), 2);
}

#[test]
fn falls_back_to_usd_when_amounts_missing() {
    let mut a = transfer("in", "0xa", "0xx", 0, 0.0).with_amount_usd(250.0);
    a.amount = None;
    let mut b = transfer("out", "0xx", "0xb", 60, 0.0).with_amount_usd(249.0);
    b.amount = None;
    let out = collapse(&[a, b], &CollapseConfig::default());
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].amount_usd, Some(249.0));
    assert_eq!(out[0].amount, None);
}

#[test]
fn non_transfers_pass_through() {
    let mut swap = transfer("in", "0xa", "0xx", 0, 100.0);
    swap.kind = ActivityType::Swap;
    let items = [swap, transfer("out", "0xx", "0xb", 60, 100.0)];
    assert_eq!(collapse(&items, &CollapseConfig::default()).len(), 2);
}

#[test]
fn each_leg_is_used_once() {
    // two inbound legs compete for one outbound leg; the earlier one wins
    let items = [
        transfer("in2", "0xc", "0xx", 30, 100.0),
        transfer("in1", "0xa", "0xx", 0, 100.0),
        transfer("out", "0xx", "0xb", 60, 100.0),
    ];
    let out = collapse(&items, &CollapseConfig::default());
    assert_eq!(out.len(), 2);
    assert!(out.iter().any(|a| a.id == "collapsed:in1>out"));
    assert!(out.iter().any(|a| a.id == "in2"));
}

#[test]
fn empty_and_unmatched_round_trip() {
    assert!(collapse(&[], &CollapseConfig::default()).is_empty());

    let items = vec![
        transfer("a", "0xa", "0xb", 0, 1.0),
        transfer("b", "0xc", "0xd", 100, 2.0),
        transfer("c", "0xe", "0xf", 50, 3.0),
    ];
    let out = collapse(&items, &CollapseConfig::default());
    let ids: Vec<&str> = out.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c", "a"]);
    for a in &out {
        assert!(items.contains(a));
    }
}

#[test]
fn zero_window_still_matches_same_instant() {
    let cfg = CollapseConfig::new(Duration::ZERO, 0.0);
    let items = [
        transfer("in", "0xa", "0xx", 10, 5.0),
        transfer("out", "0xx", "0xb", 10, 5.0),
    ];
    assert_eq!(collapse(&items, &cfg).len(), 1);
}

fn arb_activity(idx: usize) -> impl Strategy<Value = Activity> {
    let addrs = prop::sample::select(vec!["0xa", "0xb", "0xc", "0xd"]);
    (
        addrs.clone(),
        addrs,
        0i64..7_200,
        prop::sample::select(vec![10.0, 10.05, 50.0, 100.0]),
        any::<bool>(),
    )
        .prop_map(move |(from, to, secs, amount, is_transfer)| {
            let mut a = transfer(&format!("r{idx}"), from, to, secs, amount);
            if !is_transfer {
                a.kind = ActivityType::Unknown;
            }
            a
        })
}

fn arb_activities() -> impl Strategy<Value = Vec<Activity>> {
    (0usize..24).prop_flat_map(|n| (0..n).map(arb_activity).collect::<Vec<_>>())
}

proptest! {
    #[test]
    fn collapse_is_conservative(items in arb_activities()) {
        let out = collapse(&items, &CollapseConfig::default());
        let input_ids: HashSet<&str> = items.iter().map(|a| a.id.as_str()).collect();

        let synthetic: Vec<&Activity> = out.iter().filter(|a| a.is_collapsed()).collect();
        // every synthetic record replaces exactly two inputs
        prop_assert_eq!(out.len() + synthetic.len(), items.len());

        let mut consumed = HashSet::new();
        for s in &synthetic {
            prop_assert!(!input_ids.contains(s.id.as_str()));
            let meta = s.meta.as_ref().unwrap();
            let in_id = meta["inId"].as_str().unwrap();
            let out_id = meta["outId"].as_str().unwrap();
            prop_assert!(input_ids.contains(in_id));
            prop_assert!(input_ids.contains(out_id));
            prop_assert!(consumed.insert(in_id.to_string()));
            prop_assert!(consumed.insert(out_id.to_string()));
        }
        for a in out.iter().filter(|a| !a.is_collapsed()) {
            prop_assert!(items.contains(a));
            prop_assert!(!consumed.contains(&a.id));
        }

        let out_ids: HashSet<&str> = out.iter().map(|a| a.id.as_str()).collect();
        prop_assert_eq!(out_ids.len(), out.len());
        prop_assert!(out.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn without_transfers_nothing_collapses(items in arb_activities()) {
        let items: Vec<Activity> = items
            .into_iter()
            .map(|mut a| { a.kind = ActivityType::Unknown; a })
            .collect();
        let out = collapse(&items, &CollapseConfig::default());
        prop_assert_eq!(out.len(), items.len());
        prop_assert!(out.iter().all(|a| !a.is_collapsed()));
    }
}
