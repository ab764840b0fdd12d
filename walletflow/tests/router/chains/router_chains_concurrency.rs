use std::time::Duration;

use walletflow::{ChainId, FetchOptions};
use walletflow_mock::DynamicMockProvider;

use crate::helpers::{WALLET, flow};

const CHAINS: &[ChainId] = &[
    ChainId::ETHEREUM,
    ChainId::OPTIMISM,
    ChainId::BNB,
    ChainId::POLYGON,
    ChainId::ARBITRUM,
    ChainId::AVALANCHE,
];

#[tokio::test(start_paused = true)]
async fn never_exceeds_the_concurrency_ceiling() {
    for limit in [1usize, 2, 4] {
        let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
        ctl.set_latency(Duration::from_millis(50)).await;
        let wf = flow(provider);

        let opts = FetchOptions::default().concurrency(limit);
        let results = wf
            .fetch_all_chains_with(CHAINS, WALLET, &opts)
            .await
            .unwrap();

        assert_eq!(results.len(), CHAINS.len());
        assert_eq!(ctl.max_in_flight(), limit, "limit {limit}");
    }
}

#[tokio::test(start_paused = true)]
async fn concurrent_chains_overlap_in_time() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_latency(Duration::from_millis(100)).await;
    let wf = flow(provider);

    let start = tokio::time::Instant::now();
    let opts = FetchOptions::default().concurrency(3);
    wf.fetch_all_chains_with(&CHAINS[..3], WALLET, &opts)
        .await
        .unwrap();
    // three single-page chains in parallel take one latency, not three
    assert!(start.elapsed() < Duration::from_millis(150));
}

#[tokio::test(start_paused = true)]
async fn zero_concurrency_still_makes_progress() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_latency(Duration::from_millis(5)).await;
    let wf = flow(provider);
    let opts = FetchOptions::default().concurrency(0);
    let results = wf
        .fetch_all_chains_with(CHAINS, WALLET, &opts)
        .await
        .unwrap();
    assert_eq!(results.len(), CHAINS.len());
    assert_eq!(ctl.max_in_flight(), 1);
}
