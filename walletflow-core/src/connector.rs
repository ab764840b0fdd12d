use async_trait::async_trait;

use crate::raw::{PageRequest, RawPage};
use walletflow_types::{ChainId, FlowError, ProviderKey};

/// Focused role trait for providers that can decode a single transaction.
#[async_trait]
pub trait TransactionDetailsProvider: Send + Sync {
    /// Fetch the provider's decoded view (including event logs) of one transaction.
    async fn transaction_details(
        &self,
        chain: ChainId,
        tx_hash: &str,
    ) -> Result<serde_json::Value, FlowError>;
}

/// A blockchain-data provider able to list a wallet's transactions page by page.
///
/// Implementations differ in their HTTP dialect (offset pages vs. cursors) but all
/// map their payload into [`RawPage`], whose `has_more` gives a uniform
/// continuation contract.
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    /// Stable provider name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Human-readable vendor label.
    fn vendor(&self) -> &'static str {
        self.name()
    }

    /// Typed key for this provider.
    fn key(&self) -> ProviderKey {
        ProviderKey::new(self.name())
    }

    /// Check preconditions that must hold before any network call.
    ///
    /// # Errors
    /// Returns `MissingCredential` when the provider has no credential configured.
    fn ensure_ready(&self) -> Result<(), FlowError> {
        Ok(())
    }

    /// Page size the provider will actually honor for a requested size.
    fn effective_page_size(&self, requested: u32) -> u32 {
        requested
    }

    /// Page ceiling used when the caller does not configure one.
    fn default_max_pages(&self) -> u32 {
        3
    }

    /// Fetch one page of raw transaction records for `address` on `chain`.
    ///
    /// # Errors
    /// `MissingCredential` before any I/O when no key is configured;
    /// `InvalidCredential` for 401/403; `ProviderRequestFailed` for other non-2xx
    /// or transport failures; `MalformedResponse` for undecodable payloads.
    async fn fetch_page(
        &self,
        chain: ChainId,
        address: &str,
        page: &PageRequest,
    ) -> Result<RawPage, FlowError>;

    /// If implemented, returns a trait object for transaction details.
    fn as_transaction_details_provider(&self) -> Option<&dyn TransactionDetailsProvider> {
        None
    }
}
