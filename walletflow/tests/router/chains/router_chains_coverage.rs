use proptest::prelude::*;
use walletflow::{ChainId, FetchOptions, FlowError, RawPage};
use walletflow_mock::{DynamicMockProvider, MockBehavior};

use crate::helpers::{WALLET, flow, page_of};

#[tokio::test]
async fn partial_failure_is_absorbed_in_order() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_pages(ChainId::ETHEREUM, vec![page_of("eth", 3)]).await;
    ctl.set_page_behavior(
        ChainId::POLYGON,
        0,
        MockBehavior::Fail(FlowError::from_status("mock", 502, Some("bad gateway".into()))),
    )
    .await;
    ctl.set_pages(ChainId::ARBITRUM, vec![page_of("arb", 1)]).await;
    let wf = flow(provider);

    let chains = [ChainId::ETHEREUM, ChainId::POLYGON, ChainId::ARBITRUM];
    let results = wf.fetch_all_chains(&chains, WALLET).await.unwrap();

    let ids: Vec<ChainId> = results.iter().map(|r| r.chain_id).collect();
    assert_eq!(ids, chains);
    assert_eq!(results[0].items.len(), 3);
    assert!(results[0].is_ok());

    assert!(results[1].items.is_empty());
    let err = results[1].error.as_ref().expect("polygon error");
    assert_eq!(err.chain_id(), Some(ChainId::POLYGON));
    assert!(matches!(
        err.root(),
        FlowError::ProviderRequestFailed { status: Some(502), .. }
    ));

    assert_eq!(results[2].items.len(), 1);
}

#[tokio::test]
async fn failure_on_a_later_page_discards_the_chain() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(
        ChainId::ETHEREUM,
        0,
        MockBehavior::Return(RawPage::new(
            page_of("eth", 2),
            Some(walletflow::Continuation::Page(1)),
        )),
    )
    .await;
    ctl.set_page_behavior(
        ChainId::ETHEREUM,
        1,
        MockBehavior::Fail(FlowError::transport("mock", "connection reset")),
    )
    .await;
    let wf = flow(provider);

    let opts = FetchOptions::default().page_size(2).max_pages(Some(5));
    let results = wf
        .fetch_all_chains_with(&[ChainId::ETHEREUM], WALLET, &opts)
        .await
        .unwrap();
    assert!(results[0].items.is_empty());
    assert!(results[0].error.is_some());
    assert_eq!(ctl.calls().await.len(), 2);
}

#[tokio::test]
async fn empty_request_returns_empty() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    let wf = flow(provider);
    let results = wf.fetch_all_chains(&[], WALLET).await.unwrap();
    assert!(results.is_empty());
    assert!(ctl.calls().await.is_empty());
}

fn chain_pool() -> Vec<ChainId> {
    vec![
        ChainId::ETHEREUM,
        ChainId::OPTIMISM,
        ChainId::BNB,
        ChainId::POLYGON,
        ChainId::ARBITRUM,
        ChainId::AVALANCHE,
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn one_result_per_requested_chain(
        picks in proptest::collection::vec(0usize..6, 0..8),
        failing in proptest::collection::vec(any::<bool>(), 6),
        concurrency in 1usize..5,
    ) {
        let pool = chain_pool();
        let chains: Vec<ChainId> = picks.iter().map(|&i| pool[i]).collect();
        let results = tokio_test::block_on(async {
            let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
            for (i, chain) in pool.iter().enumerate() {
                if failing[i] {
                    ctl.set_page_behavior(*chain, 0, MockBehavior::Fail(FlowError::transport("mock", "down"))).await;
                } else {
                    ctl.set_pages(*chain, vec![page_of(&chain.to_string(), 1)]).await;
                }
            }
            let wf = flow(provider);
            let opts = FetchOptions::default().concurrency(concurrency);
            wf.fetch_all_chains_with(&chains, WALLET, &opts).await
        }).unwrap();

        prop_assert_eq!(results.len(), chains.len());
        for (result, chain) in results.iter().zip(&chains) {
            prop_assert_eq!(result.chain_id, *chain);
            let idx = pool.iter().position(|c| c == chain).unwrap();
            prop_assert_eq!(result.error.is_some(), failing[idx]);
            prop_assert_eq!(result.items.len(), usize::from(!failing[idx]));
        }
    }
}
