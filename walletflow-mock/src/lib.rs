//! walletflow-mock
//!
//! Network-free [`TransactionProvider`] implementations:
//! - [`MockProvider`]: fixed fixture data for a demo wallet, paged like an
//!   offset-paginated provider.
//! - [`DynamicMockProvider`]: behavior scripted at runtime through a
//!   [`DynamicMockController`].
use async_trait::async_trait;
use walletflow_core::{
    ChainId, Continuation, FlowError, PageRequest, ProviderKey, RawPage,
    TransactionDetailsProvider, TransactionProvider,
};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockProvider, MockBehavior, PageCall};
pub use fixtures::{DEMO_WALLET, EXCHANGE, FUNDER, PAYEE, fixture_hash};

/// Mock provider for CI-safe demos. Serves deterministic data from static fixtures.
///
/// Addresses other than [`DEMO_WALLET`] get empty listings, and
/// [`MockProvider::FAIL_ADDRESS`] fails every request.
pub struct MockProvider {
    ready: bool,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Static provider key.
    pub const KEY: ProviderKey = ProviderKey::new("walletflow-mock");
    /// Address whose requests always fail with a provider error.
    pub const FAIL_ADDRESS: &'static str = "0x00000000000000000000000000000000000fa11e";

    /// A provider with a (pretend) credential configured.
    #[must_use]
    pub const fn new() -> Self {
        Self { ready: true }
    }

    /// A provider that reports `MissingCredential` like an unconfigured HTTP provider.
    #[must_use]
    pub const fn without_credential() -> Self {
        Self { ready: false }
    }

    fn check(&self, address: &str) -> Result<(), FlowError> {
        self.ensure_ready()?;
        if address.eq_ignore_ascii_case(Self::FAIL_ADDRESS) {
            return Err(FlowError::from_status(
                Self::KEY.as_str(),
                500,
                Some("forced failure".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionProvider for MockProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn ensure_ready(&self) -> Result<(), FlowError> {
        if self.ready {
            Ok(())
        } else {
            Err(FlowError::missing_credential(Self::KEY.as_str()))
        }
    }

    async fn fetch_page(
        &self,
        chain: ChainId,
        address: &str,
        page: &PageRequest,
    ) -> Result<RawPage, FlowError> {
        self.check(address)?;
        if !address.eq_ignore_ascii_case(DEMO_WALLET) {
            return Ok(RawPage::empty());
        }
        let all = fixtures::records(chain);
        let size = page.page_size as usize;
        let start = (page.page_number as usize).saturating_mul(size);
        let end = start.saturating_add(size).min(all.len());
        if start >= end {
            return Ok(RawPage::empty());
        }
        let continuation =
            (end < all.len()).then(|| Continuation::Page(page.page_number.saturating_add(1)));
        Ok(RawPage::new(all[start..end].to_vec(), continuation))
    }

    fn as_transaction_details_provider(&self) -> Option<&dyn TransactionDetailsProvider> {
        Some(self as &dyn TransactionDetailsProvider)
    }
}

#[async_trait]
impl TransactionDetailsProvider for MockProvider {
    async fn transaction_details(
        &self,
        chain: ChainId,
        tx_hash: &str,
    ) -> Result<serde_json::Value, FlowError> {
        self.ensure_ready()?;
        let found = fixtures::records(chain).into_iter().find(|r| {
            r.tx_hash
                .as_deref()
                .is_some_and(|h| h.eq_ignore_ascii_case(tx_hash))
        });
        match found {
            Some(record) => serde_json::to_value(record)
                .map_err(|e| FlowError::malformed(Self::KEY.as_str(), e.to_string())),
            None => Err(FlowError::from_status(
                Self::KEY.as_str(),
                404,
                Some(format!("transaction {tx_hash} not found")),
            )),
        }
    }
}
