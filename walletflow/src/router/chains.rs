use walletflow_core::{ChainId, FetchResult, FlowError, RawTransaction, WalletflowConfig};

use crate::Walletflow;
use crate::limiter::ConcurrencyLimiter;
use crate::pager::{PagerOptions, fetch_all};

/// Per-call overrides for a multi-chain fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of chains in flight.
    pub concurrency: usize,
    /// Paging parameters applied to every chain.
    pub pager: PagerOptions,
}

impl From<&WalletflowConfig> for FetchOptions {
    fn from(cfg: &WalletflowConfig) -> Self {
        Self {
            concurrency: cfg.concurrency,
            pager: PagerOptions::from(cfg),
        }
    }
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::from(&WalletflowConfig::default())
    }
}

impl FetchOptions {
    /// Override the concurrency ceiling.
    #[must_use]
    pub const fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n;
        self
    }

    /// Override the page size.
    #[must_use]
    pub const fn page_size(mut self, size: u32) -> Self {
        self.pager.page_size = size;
        self
    }

    /// Override the page ceiling.
    #[must_use]
    pub const fn max_pages(mut self, pages: Option<u32>) -> Self {
        self.pager.max_pages = pages;
        self
    }
}

impl Walletflow {
    /// Fetch raw records for `address` on every chain in `chain_ids`, using the
    /// configured concurrency and paging.
    ///
    /// # Errors
    /// See [`fetch_all_chains_with`](Self::fetch_all_chains_with).
    pub async fn fetch_all_chains(
        &self,
        chain_ids: &[ChainId],
        address: &str,
    ) -> Result<Vec<FetchResult<RawTransaction>>, FlowError> {
        let opts = FetchOptions::from(&self.cfg);
        self.fetch_all_chains_with(chain_ids, address, &opts).await
    }

    /// Fetch raw records for `address` on every chain in `chain_ids`.
    ///
    /// Behavior:
    /// - At most `opts.concurrency` chains are fetched at once; pages within a chain
    ///   are sequential.
    /// - Exactly one result per requested chain, in request order. A chain that
    ///   fails yields empty `items` with the failure in `error`; other chains are
    ///   unaffected.
    ///
    /// # Errors
    /// Returns `MissingCredential` (before any request) when the provider has no
    /// credential. No other failure escapes.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow::router::fetch_all_chains",
            skip(self, chain_ids, opts),
            fields(provider = self.provider.name(), chains = chain_ids.len(), concurrency = opts.concurrency),
            err,
        )
    )]
    pub async fn fetch_all_chains_with(
        &self,
        chain_ids: &[ChainId],
        address: &str,
        opts: &FetchOptions,
    ) -> Result<Vec<FetchResult<RawTransaction>>, FlowError> {
        self.provider.ensure_ready()?;

        let limiter = ConcurrencyLimiter::new(opts.concurrency);
        let provider = self.provider.as_ref();
        let tasks = chain_ids.iter().map(|&chain| {
            let limiter = &limiter;
            let pager = &opts.pager;
            async move {
                match limiter.limit(fetch_all(provider, chain, address, pager)).await {
                    Ok(items) => FetchResult::ok(chain, items),
                    Err(err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(chain = %chain, error = %err, "chain fetch failed; continuing with an empty result");
                        FetchResult::failed(err.chain_id().unwrap_or(chain), err)
                    }
                }
            }
        });
        let results = futures::future::join_all(tasks).await;

        if let Some(fatal) = results
            .iter()
            .filter_map(|r| r.error.as_ref())
            .find(|e| e.is_fatal())
        {
            return Err(fatal.root().clone());
        }
        Ok(results)
    }
}
