use std::sync::Arc;
use std::time::Duration;

use walletflow_core::{CollapseConfig, FlowError, TransactionProvider, WalletflowConfig};

/// Orchestrator that fetches a wallet's activity from one provider across chains.
pub struct Walletflow {
    pub(crate) provider: Arc<dyn TransactionProvider>,
    pub(crate) cfg: WalletflowConfig,
}

/// Builder for constructing a `Walletflow` orchestrator with custom configuration.
pub struct WalletflowBuilder {
    provider: Option<Arc<dyn TransactionProvider>>,
    cfg: WalletflowConfig,
}

impl Default for WalletflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletflowBuilder {
    /// Create a new builder with the default configuration.
    ///
    /// Defaults: two chains in flight, 100 records per page, the provider's own page
    /// ceiling, 200 ms between pages, a 30 s per-page timeout, and relay-hop
    /// collapsing with a 60 minute window and 1% tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            provider: None,
            cfg: WalletflowConfig::default(),
        }
    }

    /// Register the transaction provider. A later call replaces an earlier one.
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn TransactionProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: WalletflowConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Maximum number of chains fetched at once (`0` behaves like `1`).
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.cfg.concurrency = n;
        self
    }

    /// Records requested per page.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.cfg.page_size = size;
        self
    }

    /// Hard ceiling on pages per chain; `None` defers to the provider's default.
    #[must_use]
    pub const fn max_pages(mut self, pages: Option<u32>) -> Self {
        self.cfg.max_pages = pages;
        self
    }

    /// Pause between consecutive page requests of one chain.
    #[must_use]
    pub const fn page_delay(mut self, delay: Duration) -> Self {
        self.cfg.page_delay = delay;
        self
    }

    /// Bound every page request; `None` waits indefinitely.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Relay-hop collapsing applied by [`Walletflow::timeline`].
    #[must_use]
    pub const fn collapse(mut self, collapse: CollapseConfig) -> Self {
        self.cfg.collapse = collapse;
        self
    }

    /// Build the `Walletflow` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no provider has been registered via
    /// [`with_provider`](Self::with_provider) or the page size is zero.
    pub fn build(self) -> Result<Walletflow, FlowError> {
        let Some(provider) = self.provider else {
            return Err(FlowError::InvalidArg(
                "no provider registered; add one via with_provider(...)".to_string(),
            ));
        };
        if self.cfg.page_size == 0 {
            return Err(FlowError::InvalidArg(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(Walletflow {
            provider,
            cfg: self.cfg,
        })
    }
}

impl Walletflow {
    /// Start building a new `Walletflow` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use walletflow::Walletflow;
    /// use walletflow_mock::MockProvider;
    ///
    /// let wf = Walletflow::builder()
    ///     .with_provider(Arc::new(MockProvider::new()))
    ///     .concurrency(3)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> WalletflowBuilder {
        WalletflowBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &WalletflowConfig {
        &self.cfg
    }

    /// The registered provider.
    #[must_use]
    pub fn provider(&self) -> &Arc<dyn TransactionProvider> {
        &self.provider
    }
}

/// Wrap a provider future with an optional timeout and standardized timeout error mapping.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "walletflow::core::provider_call_with_timeout",
        skip(fut),
        fields(
            provider = provider_name,
            timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        ),
    )
)]
pub(crate) async fn provider_call_with_timeout<T, Fut>(
    provider_name: &'static str,
    timeout: Option<Duration>,
    fut: Fut,
) -> Result<T, FlowError>
where
    Fut: core::future::Future<Output = Result<T, FlowError>>,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .unwrap_or_else(|_| Err(FlowError::provider_timeout(provider_name))),
        None => fut.await,
    }
}
