use std::time::Duration;

use walletflow::{ChainId, FetchOptions, FlowError, PagerOptions, fetch_all};
use walletflow_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{WALLET, flow, page_of};

#[tokio::test(start_paused = true)]
async fn hung_page_times_out() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(ChainId::ETHEREUM, 0, MockBehavior::Hang)
        .await;
    let opts = PagerOptions {
        timeout: Some(Duration::from_secs(2)),
        ..PagerOptions::default()
    };
    let err = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts)
        .await
        .unwrap_err();
    assert_eq!(err.chain_id(), Some(ChainId::ETHEREUM));
    assert!(matches!(err.root(), FlowError::ProviderTimeout { .. }));
}

#[tokio::test(start_paused = true)]
async fn hung_chain_does_not_block_the_others() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(ChainId::POLYGON, 0, MockBehavior::Hang)
        .await;
    ctl.set_pages(ChainId::ETHEREUM, vec![page_of("eth", 2)]).await;
    let wf = flow(provider);

    let mut opts = FetchOptions::default().concurrency(1);
    opts.pager.timeout = Some(Duration::from_secs(1));
    let results = wf
        .fetch_all_chains_with(&[ChainId::POLYGON, ChainId::ETHEREUM], WALLET, &opts)
        .await
        .unwrap();
    assert!(results[0].error.is_some());
    assert_eq!(results[1].items.len(), 2);
}
