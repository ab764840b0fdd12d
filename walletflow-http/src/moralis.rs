use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::adapter::{HttpGet, RealAdapter};
use crate::{join_segments, parse_base_url, parse_json, status_error};
use walletflow_core::numeric::{json_f64, json_u32};
use walletflow_core::{
    ChainId, Continuation, Credential, FlowError, PageRequest, ProviderKey, RawPage,
    RawTokenTransfer, RawTransaction, TransactionDetailsProvider, TransactionProvider,
};

/// Chain parameter understood by the cursor provider: a slug for well-known chains,
/// `0x`-prefixed hex otherwise.
#[must_use]
pub fn chain_slug(chain: ChainId) -> Cow<'static, str> {
    match chain {
        ChainId::ETHEREUM => Cow::Borrowed("eth"),
        ChainId::BNB => Cow::Borrowed("bsc"),
        ChainId::POLYGON => Cow::Borrowed("polygon"),
        ChainId::OPTIMISM => Cow::Borrowed("optimism"),
        ChainId::ARBITRUM => Cow::Borrowed("arbitrum"),
        ChainId::AVALANCHE => Cow::Borrowed("avalanche"),
        other => Cow::Owned(format!("0x{:x}", other.get())),
    }
}

/// Cursor-paginated provider speaking the Moralis wallet-history dialect.
pub struct MoralisProvider {
    http: Arc<dyn HttpGet>,
    base_url: Url,
    credential: Option<Credential>,
}

impl MoralisProvider {
    /// Static provider key.
    pub const KEY: ProviderKey = ProviderKey::new("moralis");
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://deep-index.moralis.io/api/v2.2";
    /// Header carrying the credential.
    pub const API_KEY_HEADER: &'static str = "X-API-Key";
    /// Sub-records requested with every history page.
    pub const INCLUDE: &'static str = "internal_transactions,erc20_transfers,nft_transfers";
    /// Smallest page the API accepts.
    pub const MIN_LIMIT: u32 = 10;
    /// Largest page the API accepts.
    pub const MAX_LIMIT: u32 = 100;
    /// Page ceiling when the caller does not set one.
    pub const DEFAULT_MAX_PAGES: u32 = 10;

    /// Start building a provider.
    #[must_use]
    pub fn builder() -> MoralisBuilder {
        MoralisBuilder::default()
    }

    /// Configured API root.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn credential(&self) -> Result<&Credential, FlowError> {
        self.credential
            .as_ref()
            .ok_or_else(|| FlowError::missing_credential(Self::KEY.as_str()))
    }

    fn history_url(&self, chain: ChainId, address: &str, page: &PageRequest) -> Url {
        let mut url = join_segments(&self.base_url, &["wallets", address, "history"]);
        {
            let mut q = url.query_pairs_mut();
            q.append_pair("chain", &chain_slug(chain))
                .append_pair("limit", &self.effective_page_size(page.page_size).to_string())
                .append_pair("order", "DESC")
                .append_pair("include", Self::INCLUDE);
            if let Some(cursor) = page.cursor.as_deref().filter(|c| !c.is_empty()) {
                q.append_pair("cursor", cursor);
            }
        }
        url
    }

    async fn get_json(&self, url: Url) -> Result<Value, FlowError> {
        let cred = self.credential()?;
        let headers = [(Self::API_KEY_HEADER, cred.expose().to_string())];
        let resp = self
            .http
            .get(url, &headers)
            .await
            .map_err(|msg| FlowError::transport(Self::KEY.as_str(), msg))?;
        if !resp.is_success() {
            return Err(status_error(
                Self::KEY.as_str(),
                resp.status,
                &resp.body,
                "message",
            ));
        }
        parse_json(Self::KEY.as_str(), &resp.body)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HistoryItem {
    hash: Option<String>,
    transaction_hash: Option<String>,
    tx_hash: Option<String>,
    block_timestamp: Option<String>,
    block_signed_at: Option<String>,
    from_address: Option<String>,
    to_address: Option<String>,
    value: Option<Value>,
    value_usd: Option<Value>,
    value_quote: Option<Value>,
    erc20_transfers: Option<Vec<HistoryTokenTransfer>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HistoryTokenTransfer {
    from_address: Option<String>,
    to_address: Option<String>,
    token_symbol: Option<String>,
    symbol: Option<String>,
    token_decimals: Option<Value>,
    decimals: Option<Value>,
    address: Option<String>,
    token_address: Option<String>,
    value: Option<Value>,
    value_decimal: Option<Value>,
}

impl From<HistoryTokenTransfer> for RawTokenTransfer {
    fn from(t: HistoryTokenTransfer) -> Self {
        let decimals = t
            .token_decimals
            .as_ref()
            .or(t.decimals.as_ref())
            .and_then(json_u32);
        Self {
            from_address: t.from_address,
            to_address: t.to_address,
            token_symbol: t.token_symbol.or(t.symbol),
            token_decimals: decimals,
            token_address: t.address.or(t.token_address),
            value: t.value,
            value_decimal: t.value_decimal.as_ref().and_then(json_f64),
        }
    }
}

impl From<HistoryItem> for RawTransaction {
    fn from(it: HistoryItem) -> Self {
        Self {
            tx_hash: it.hash.or(it.transaction_hash).or(it.tx_hash),
            block_signed_at: it.block_timestamp.or(it.block_signed_at),
            from_address: it.from_address,
            to_address: it.to_address,
            value: it.value,
            value_quote: it
                .value_usd
                .as_ref()
                .and_then(json_f64)
                .or_else(|| it.value_quote.as_ref().and_then(json_f64)),
            quote_rate: None,
            gas_quote_rate: None,
            erc20_transfers: it
                .erc20_transfers
                .map(|ts| ts.into_iter().map(RawTokenTransfer::from).collect()),
        }
    }
}

/// Decode a history response: items under `result` (or `data`), next cursor under
/// `cursor` (or `next`).
fn decode_page(mut json: Value) -> Result<RawPage, FlowError> {
    let provider = MoralisProvider::KEY.as_str();
    let key = if json.get("result").is_some_and(|v| !v.is_null()) {
        "result"
    } else {
        "data"
    };
    let items = json
        .get_mut(key)
        .map(Value::take)
        .unwrap_or(Value::Array(Vec::new()));
    let items: Vec<HistoryItem> = if items.is_null() {
        Vec::new()
    } else {
        serde_json::from_value(items).map_err(|e| FlowError::malformed(provider, e.to_string()))?
    };
    let cursor = ["cursor", "next"].iter().find_map(|k| {
        json.get(*k)
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    });
    Ok(RawPage::new(
        items.into_iter().map(RawTransaction::from).collect(),
        cursor.map(Continuation::Cursor),
    ))
}

#[async_trait]
impl TransactionProvider for MoralisProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Moralis"
    }

    fn ensure_ready(&self) -> Result<(), FlowError> {
        self.credential().map(|_| ())
    }

    fn effective_page_size(&self, requested: u32) -> u32 {
        requested.clamp(Self::MIN_LIMIT, Self::MAX_LIMIT)
    }

    fn default_max_pages(&self) -> u32 {
        Self::DEFAULT_MAX_PAGES
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow_http::moralis::fetch_page",
            skip(self, page),
            fields(chain = %chain, page_number = page.page_number, has_cursor = page.cursor.is_some()),
            err,
        )
    )]
    async fn fetch_page(
        &self,
        chain: ChainId,
        address: &str,
        page: &PageRequest,
    ) -> Result<RawPage, FlowError> {
        self.credential()?;
        let url = self.history_url(chain, address, page);
        let json = self.get_json(url).await?;
        decode_page(json)
    }

    fn as_transaction_details_provider(&self) -> Option<&dyn TransactionDetailsProvider> {
        Some(self as &dyn TransactionDetailsProvider)
    }
}

#[async_trait]
impl TransactionDetailsProvider for MoralisProvider {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow_http::moralis::transaction_details",
            skip(self),
            fields(chain = %chain),
            err,
        )
    )]
    async fn transaction_details(&self, chain: ChainId, tx_hash: &str) -> Result<Value, FlowError> {
        self.credential()?;
        let mut url = join_segments(&self.base_url, &["transaction", tx_hash]);
        url.query_pairs_mut().append_pair("chain", &chain_slug(chain));
        let mut json = self.get_json(url).await?;
        for key in ["result", "data"] {
            if let Some(v) = json.get_mut(key).filter(|v| !v.is_null()) {
                return Ok(v.take());
            }
        }
        Ok(json)
    }
}

/// Builder for [`MoralisProvider`].
#[derive(Default)]
pub struct MoralisBuilder {
    credential: Option<Credential>,
    base_url: Option<String>,
    http: Option<Arc<dyn HttpGet>>,
}

impl MoralisBuilder {
    /// Set the API key; blank keys count as absent.
    #[must_use]
    pub fn api_key(mut self, key: impl AsRef<str>) -> Self {
        self.credential = Credential::new(key);
        self
    }

    /// Set (or clear) the credential.
    #[must_use]
    pub fn credential(mut self, credential: Option<Credential>) -> Self {
        self.credential = credential;
        self
    }

    /// Override the API root.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Inject a transport (tests only).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn http(mut self, http: Arc<dyn HttpGet>) -> Self {
        self.http = Some(http);
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable base URL or if the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<MoralisProvider, FlowError> {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(MoralisProvider::DEFAULT_BASE_URL);
        let base_url = parse_base_url(MoralisProvider::KEY.as_str(), base)?;
        let http: Arc<dyn HttpGet> = match self.http {
            Some(h) => h,
            None => Arc::new(RealAdapter::new()?),
        };
        Ok(MoralisProvider {
            http,
            base_url,
            credential: self.credential,
        })
    }
}
