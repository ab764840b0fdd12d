use std::time::Duration;

use walletflow::{ChainId, PagerOptions, fetch_all};
use walletflow_mock::DynamicMockProvider;

use crate::helpers::{WALLET, page_of};

#[tokio::test(start_paused = true)]
async fn pages_are_paced_by_the_configured_delay() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_pages(
        ChainId::ETHEREUM,
        vec![page_of("p0", 2), page_of("p1", 2), page_of("p2", 1)],
    )
    .await;

    let opts = PagerOptions {
        page_size: 2,
        max_pages: Some(5),
        ..PagerOptions::default()
    };
    assert_eq!(opts.page_delay, Duration::from_millis(200));

    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts)
        .await
        .unwrap();
    assert_eq!(records.len(), 5);

    let calls = ctl.calls().await;
    assert_eq!(calls.len(), 3);
    for pair in calls.windows(2) {
        assert!(pair[1].at - pair[0].at >= Duration::from_millis(200));
    }
}

#[tokio::test(start_paused = true)]
async fn single_page_is_not_delayed() {
    let (provider, _ctl) = DynamicMockProvider::new_with_controller("mock");
    let start = tokio::time::Instant::now();
    fetch_all(
        provider.as_ref(),
        ChainId::ETHEREUM,
        WALLET,
        &PagerOptions::default(),
    )
    .await
    .unwrap();
    assert!(start.elapsed() < Duration::from_millis(200));
}
