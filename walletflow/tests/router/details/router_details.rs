use std::sync::Arc;

use async_trait::async_trait;
use walletflow::{ChainId, FlowError, PageRequest, RawPage, TransactionProvider};
use walletflow_mock::{MockProvider, fixture_hash};

use crate::helpers::flow;

struct PagesOnly;

#[async_trait]
impl TransactionProvider for PagesOnly {
    fn name(&self) -> &'static str {
        "pages-only"
    }

    async fn fetch_page(
        &self,
        _chain: ChainId,
        _address: &str,
        _page: &PageRequest,
    ) -> Result<RawPage, FlowError> {
        Ok(RawPage::empty())
    }
}

#[tokio::test]
async fn details_come_from_the_capability() {
    let wf = flow(Arc::new(MockProvider::new()));
    let hash = fixture_hash(ChainId::POLYGON, 2);
    let json = wf
        .transaction_details(ChainId::POLYGON, &hash)
        .await
        .unwrap();
    assert_eq!(json["erc20_transfers"][0]["token_symbol"], "USDC");
}

#[tokio::test]
async fn providers_without_the_capability_are_unsupported() {
    let wf = flow(Arc::new(PagesOnly));
    let err = wf
        .transaction_details(ChainId::ETHEREUM, "0x1")
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Unsupported { .. }));
}

#[tokio::test]
async fn details_require_a_credential() {
    let wf = flow(Arc::new(MockProvider::without_credential()));
    let err = wf
        .transaction_details(ChainId::ETHEREUM, "0x1")
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::MissingCredential { .. }));
}
