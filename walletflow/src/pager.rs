use std::time::Duration;

use walletflow_core::{
    ChainId, FlowError, PageRequest, RawTransaction, TransactionProvider, WalletflowConfig,
};

use crate::core::provider_call_with_timeout;

/// Paging parameters for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerOptions {
    /// Records requested per page.
    pub page_size: u32,
    /// Hard ceiling on pages; `None` uses the provider's default.
    pub max_pages: Option<u32>,
    /// Pause between consecutive page requests.
    pub page_delay: Duration,
    /// Per-page timeout.
    pub timeout: Option<Duration>,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self::from(&WalletflowConfig::default())
    }
}

impl From<&WalletflowConfig> for PagerOptions {
    fn from(cfg: &WalletflowConfig) -> Self {
        Self {
            page_size: cfg.page_size,
            max_pages: cfg.max_pages,
            page_delay: cfg.page_delay,
            timeout: cfg.provider_timeout,
        }
    }
}

/// Fetch every page of `address` on `chain`, in order.
///
/// Stops when the continuation runs out, a page comes back shorter than the
/// provider's effective page size, or the page ceiling is reached. Pages are
/// separated by `page_delay`. A failed page is never retried: the error is
/// returned tagged with `chain`. A page the provider could not decode ends the
/// listing as if it were an empty final page.
///
/// # Errors
/// `InvalidArg` for a zero page size; otherwise the first page failure, wrapped in
/// `FlowError::ChainFetch`.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "walletflow::pager::fetch_all",
        skip(provider, opts),
        fields(provider = provider.name(), chain = %chain, page_size = opts.page_size),
        err,
    )
)]
pub async fn fetch_all(
    provider: &dyn TransactionProvider,
    chain: ChainId,
    address: &str,
    opts: &PagerOptions,
) -> Result<Vec<RawTransaction>, FlowError> {
    if opts.page_size == 0 {
        return Err(FlowError::InvalidArg("page_size must be at least 1".into()));
    }
    let effective = provider.effective_page_size(opts.page_size);
    let max_pages = opts
        .max_pages
        .unwrap_or_else(|| provider.default_max_pages());

    let mut records = Vec::new();
    let mut request = PageRequest::first(opts.page_size);
    for fetched in 0..max_pages {
        if fetched > 0 && !opts.page_delay.is_zero() {
            tokio::time::sleep(opts.page_delay).await;
        }
        let call = provider.fetch_page(chain, address, &request);
        let page = match provider_call_with_timeout(provider.name(), opts.timeout, call).await {
            Ok(page) => page,
            Err(err) if matches!(err, FlowError::MalformedResponse { .. }) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(chain = %chain, page = fetched, error = %err, "treating undecodable page as the last page");
                break;
            }
            Err(err) => return Err(FlowError::chain(chain, err)),
        };
        let more = page.has_more(effective);
        let continuation = page.continuation;
        records.extend(page.records);
        match continuation {
            Some(next) if more => request = request.next(&next),
            _ => break,
        }
    }
    Ok(records)
}
