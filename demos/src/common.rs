use std::sync::Arc;

use walletflow_core::{FlowError, TransactionProvider};
use walletflow_http::{HttpProviderConfig, connect};

/// Set to any value to run the demos against fixture data instead of the network.
pub const USE_MOCK_VAR: &str = "WALLETFLOW_DEMOS_USE_MOCK";

/// Wallet the demos inspect: the fixture wallet in mock mode, else `WALLETFLOW_DEMO_ADDRESS`.
pub const ADDRESS_VAR: &str = "WALLETFLOW_DEMO_ADDRESS";

/// Whether the demos run against fixture data.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var(USE_MOCK_VAR).is_ok()
}

/// Return a provider for demos.
///
/// # Errors
/// Propagates configuration errors from the environment (unknown provider, bad URL).
pub fn get_provider() -> Result<Arc<dyn TransactionProvider>, FlowError> {
    if use_mock() {
        println!("--- (Using Mock Provider for CI) ---");
        return Ok(Arc::new(walletflow_mock::MockProvider::new()));
    }
    let config = HttpProviderConfig::from_env()?;
    if !config.has_credential() {
        println!("--- (No API key configured; requests will fail with MissingCredential) ---");
    }
    connect(config)
}

/// Wallet address to inspect.
#[must_use]
pub fn demo_address() -> String {
    if use_mock() {
        return walletflow_mock::DEMO_WALLET.to_string();
    }
    std::env::var(ADDRESS_VAR).unwrap_or_else(|_| walletflow_mock::DEMO_WALLET.to_string())
}
