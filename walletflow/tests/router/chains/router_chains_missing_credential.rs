use std::sync::Arc;

use walletflow::{ChainId, FlowError};
use walletflow_mock::{DEMO_WALLET, DynamicMockProvider, MockProvider};

use crate::helpers::{WALLET, flow};

#[tokio::test]
async fn missing_credential_aborts_before_any_request() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_not_ready(Some(FlowError::missing_credential("mock")));
    let wf = flow(provider);

    let err = wf
        .fetch_all_chains(&[ChainId::ETHEREUM, ChainId::POLYGON], WALLET)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::MissingCredential { .. }));
    assert!(ctl.calls().await.is_empty());
}

#[tokio::test]
async fn timeline_propagates_missing_credential() {
    let wf = flow(Arc::new(MockProvider::without_credential()));
    let err = wf
        .timeline(&[ChainId::ETHEREUM], DEMO_WALLET, Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
}

#[tokio::test]
async fn credential_failure_during_fetch_is_still_fatal() {
    let (provider, ctl) = DynamicMockProvider::new_with_controller("mock");
    ctl.set_page_behavior(
        ChainId::POLYGON,
        0,
        walletflow_mock::MockBehavior::Fail(FlowError::missing_credential("mock")),
    )
    .await;
    let wf = flow(provider);
    let err = wf
        .fetch_all_chains(&[ChainId::ETHEREUM, ChainId::POLYGON], WALLET)
        .await
        .unwrap_err();
    assert_eq!(err, FlowError::missing_credential("mock"));
}
