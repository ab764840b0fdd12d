use walletflow::{ChainId, Continuation, FlowError, PagerOptions, RawPage, fetch_all};
use walletflow_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{WALLET, page_of};

fn opts(page_size: u32, max_pages: Option<u32>) -> PagerOptions {
    PagerOptions {
        page_size,
        max_pages,
        page_delay: std::time::Duration::ZERO,
        timeout: None,
    }
}

#[tokio::test]
async fn short_page_stops_even_with_a_continuation() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(
        ChainId::ETHEREUM,
        0,
        MockBehavior::Return(RawPage::new(page_of("a", 3), Some(Continuation::Page(1)))),
    )
    .await;
    ctl.set_pages(ChainId::POLYGON, vec![page_of("b", 10)]).await;

    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(10, Some(5)))
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(ctl.calls_for(ChainId::ETHEREUM).await.len(), 1);
}

#[tokio::test]
async fn follows_continuations_until_exhausted() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_pages(
        ChainId::ETHEREUM,
        vec![page_of("p0", 2), page_of("p1", 2), page_of("p2", 2)],
    )
    .await;

    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(2, Some(10)))
        .await
        .unwrap();
    let hashes: Vec<_> = records.iter().filter_map(|r| r.tx_hash.clone()).collect();
    assert_eq!(hashes, ["p0-0", "p0-1", "p1-0", "p1-1", "p2-0", "p2-1"]);

    let pages: Vec<u32> = ctl
        .calls()
        .await
        .iter()
        .map(|c| c.request.page_number)
        .collect();
    assert_eq!(pages, [0, 1, 2]);
}

#[tokio::test]
async fn cursor_is_forwarded() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_cursor_pages(ChainId::BNB, vec![page_of("a", 2), page_of("b", 1)])
        .await;
    let records = fetch_all(provider.as_ref(), ChainId::BNB, WALLET, &opts(2, Some(10)))
        .await
        .unwrap();
    assert_eq!(records.len(), 3);
    let calls = ctl.calls().await;
    assert_eq!(calls[0].request.cursor, None);
    assert_eq!(calls[1].request.cursor.as_deref(), Some("c1"));
}

#[tokio::test]
async fn page_ceiling_is_a_hard_limit() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_pages(
        ChainId::ETHEREUM,
        (0..6).map(|i| page_of(&format!("p{i}"), 2)).collect(),
    )
    .await;

    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(2, Some(2)))
        .await
        .unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(ctl.calls().await.len(), 2);
}

#[tokio::test]
async fn provider_default_ceiling_applies_without_override() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_default_max_pages(4);
    ctl.set_pages(
        ChainId::ETHEREUM,
        (0..6).map(|i| page_of(&format!("p{i}"), 1)).collect(),
    )
    .await;
    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(1, None))
        .await
        .unwrap();
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn effective_page_size_decides_fullness() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    // the provider serves at most 100 per page even when asked for 500
    ctl.set_page_size_cap(100);
    ctl.set_pages(ChainId::ETHEREUM, vec![page_of("a", 100), page_of("b", 7)])
        .await;
    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(500, Some(5)))
        .await
        .unwrap();
    assert_eq!(records.len(), 107);
}

#[tokio::test]
async fn malformed_page_ends_the_listing_quietly() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(
        ChainId::ETHEREUM,
        0,
        MockBehavior::Return(RawPage::new(page_of("a", 2), Some(Continuation::Page(1)))),
    )
    .await;
    ctl.set_page_behavior(
        ChainId::ETHEREUM,
        1,
        MockBehavior::Fail(FlowError::malformed("mock", "expected array")),
    )
    .await;
    let records = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(2, Some(5)))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn failures_are_tagged_and_not_retried() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(
        ChainId::OPTIMISM,
        0,
        MockBehavior::Fail(FlowError::invalid_credential("mock")),
    )
    .await;
    let err = fetch_all(provider.as_ref(), ChainId::OPTIMISM, WALLET, &opts(10, Some(3)))
        .await
        .unwrap_err();
    assert_eq!(err.chain_id(), Some(ChainId::OPTIMISM));
    assert!(matches!(err.root(), FlowError::InvalidCredential { .. }));
    assert_eq!(ctl.calls().await.len(), 1);
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
    let (provider, _ctl) = DynamicMockProvider::new_with_controller("mock");
    let err = fetch_all(provider.as_ref(), ChainId::ETHEREUM, WALLET, &opts(0, None))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::InvalidArg(_)));
}
