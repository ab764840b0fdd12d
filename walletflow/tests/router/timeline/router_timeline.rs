use std::sync::Arc;

use walletflow::{ActivityType, ChainId, CollapseConfig, Walletflow, import_tabular};
use walletflow_mock::{DEMO_WALLET, DynamicMockProvider, EXCHANGE, FUNDER, MockProvider, fixture_hash};

use crate::helpers::{ALICE, BOB, WALLET, flow, native_tx};

#[tokio::test]
async fn fixture_wallet_timeline_collapses_the_relay_hop() {
    let wf = flow(Arc::new(MockProvider::new()));
    let chains = [ChainId::ETHEREUM, ChainId::POLYGON, ChainId::ARBITRUM];
    let timeline = wf.timeline(&chains, DEMO_WALLET, Vec::new()).await.unwrap();

    // 5 + 2 + 1 records, two of which fold into one
    assert_eq!(timeline.len(), 7);
    assert!(timeline.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));

    let hop = timeline
        .iter()
        .find(|a| a.is_collapsed())
        .expect("collapsed hop");
    assert_eq!(hop.from, FUNDER);
    assert_eq!(hop.to, EXCHANGE);
    assert_eq!(hop.tx_hash, fixture_hash(ChainId::ETHEREUM, 4));
    assert!((hop.amount.unwrap() - 0.995).abs() < 1e-9);

    let unknown = timeline
        .iter()
        .filter(|a| a.kind == ActivityType::Unknown)
        .count();
    assert_eq!(unknown, 1);
}

#[tokio::test]
async fn collapse_can_be_disabled() {
    let wf = Walletflow::builder()
        .with_provider(Arc::new(MockProvider::new()))
        .page_delay(std::time::Duration::ZERO)
        .collapse(CollapseConfig::disabled())
        .build()
        .unwrap();
    let timeline = wf
        .timeline(&[ChainId::ETHEREUM], DEMO_WALLET, Vec::new())
        .await
        .unwrap();
    assert_eq!(timeline.len(), 5);
    assert!(timeline.iter().all(|a| !a.is_collapsed()));
}

#[tokio::test]
async fn file_records_merge_with_provider_records() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_pages(
        ChainId::ETHEREUM,
        vec![vec![native_tx(
            "0xshared",
            "2024-05-01T10:00:00Z",
            ALICE,
            WALLET,
            "2000000000000000000",
        )]],
    )
    .await;
    let wf = flow(provider);

    let csv = format!(
        "Transaction Hash,DateTime (UTC),From,To,Value_IN(ETH),Value_OUT(ETH),CurrentValue,Method\n\
         0xshared,2024-05-01 10:00:00,{ALICE},{WALLET},2,0,$25.00,Transfer\n\
         0xfileonly,2024-04-01 09:00:00,{WALLET},{BOB},0,1,$10.00,Transfer\n"
    );
    let file = import_tabular(&csv, ChainId::ETHEREUM);
    assert_eq!(file.len(), 2);

    let timeline = wf
        .timeline(&[ChainId::ETHEREUM], WALLET, file)
        .await
        .unwrap();

    // the provider record has no USD, the file one has 25: the hash dedup keeps the priced one
    assert_eq!(timeline.len(), 2);
    let shared = timeline.iter().find(|a| a.tx_hash == "0xshared").unwrap();
    assert_eq!(shared.amount_usd, Some(25.0));
    assert_eq!(timeline[1].tx_hash, "0xfileonly");
}

#[tokio::test]
async fn failed_chains_contribute_nothing() {
    let wf = flow(Arc::new(MockProvider::new()));
    let timeline = wf
        .timeline(&[ChainId::ETHEREUM], MockProvider::FAIL_ADDRESS, Vec::new())
        .await
        .unwrap();
    assert!(timeline.is_empty());
}
