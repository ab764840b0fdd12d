use walletflow_core::{Capability, ChainId, FlowError};

use crate::Walletflow;
use crate::core::provider_call_with_timeout;

impl Walletflow {
    /// Fetch the provider's decoded view of one transaction.
    ///
    /// # Errors
    /// `Unsupported` when the provider has no transaction-details capability,
    /// `MissingCredential` when it is not configured, or any provider failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow::router::transaction_details",
            skip(self),
            fields(provider = self.provider.name(), chain = %chain),
            err,
        )
    )]
    pub async fn transaction_details(
        &self,
        chain: ChainId,
        tx_hash: &str,
    ) -> Result<serde_json::Value, FlowError> {
        let Some(details) = self.provider.as_transaction_details_provider() else {
            return Err(FlowError::unsupported(
                Capability::TransactionDetails.as_str(),
            ));
        };
        self.provider.ensure_ready()?;
        provider_call_with_timeout(
            self.provider.name(),
            self.cfg.provider_timeout,
            details.transaction_details(chain, tx_hash),
        )
        .await
    }
}
