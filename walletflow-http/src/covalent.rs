use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::adapter::{HttpGet, RealAdapter};
use crate::{join_segments, parse_base_url, parse_json, status_error};
use walletflow_core::{
    AuthMode, ChainId, Continuation, Credential, FlowError, PageRequest, ProviderKey, RawPage,
    RawTransaction, TransactionDetailsProvider, TransactionProvider,
};

/// Offset-paginated provider speaking the Covalent `transactions_v3` dialect.
pub struct CovalentProvider {
    http: Arc<dyn HttpGet>,
    base_url: Url,
    credential: Option<Credential>,
    auth: AuthMode,
}

impl CovalentProvider {
    /// Static provider key.
    pub const KEY: ProviderKey = ProviderKey::new("covalent");
    /// Public API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.covalenthq.com/v1";
    /// Query parameter carrying the credential in [`AuthMode::Query`].
    pub const KEY_PARAM: &'static str = "key";
    /// Header carrying the credential in [`AuthMode::Header`].
    pub const AUTH_HEADER: &'static str = "Authorization";
    /// Prefix of the header value.
    pub const AUTH_PREFIX: &'static str = "Bearer ";
    /// Page ceiling when the caller does not set one.
    pub const DEFAULT_MAX_PAGES: u32 = 3;

    /// Start building a provider.
    #[must_use]
    pub fn builder() -> CovalentBuilder {
        CovalentBuilder::default()
    }

    /// Configured credential placement.
    #[must_use]
    pub const fn auth_mode(&self) -> AuthMode {
        self.auth
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

    /// Attach the credential to `url` or return it as a header.
    fn authorize(&self, url: &mut Url, cred: &Credential) -> Vec<(&'static str, String)> {
        match self.auth {
            AuthMode::Header => vec![(
                Self::AUTH_HEADER,
                format!("{}{}", Self::AUTH_PREFIX, cred.expose()),
            )],
            AuthMode::Query | _ => {
                url.query_pairs_mut()
                    .append_pair(Self::KEY_PARAM, cred.expose());
                Vec::new()
            }
        }
    }

    fn transactions_url(&self, chain: ChainId, address: &str, page: &PageRequest) -> Url {
        let chain = chain.to_string();
        let mut url = join_segments(
            &self.base_url,
            &[&chain, "address", address, "transactions_v3", ""],
        );
        url.query_pairs_mut()
            .append_pair("page-size", &page.page_size.to_string())
            .append_pair("page-number", &page.page_number.to_string());
        url
    }

    /// GET `url`, check status and the in-band error flag, and return the `data` member.
    async fn get_data(&self, mut url: Url) -> Result<Value, FlowError> {
        let cred = self.credential()?;
        let headers = self.authorize(&mut url, cred);
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
                "error_message",
            ));
        }
        let mut json = parse_json(Self::KEY.as_str(), &resp.body)?;
        if json.get("error").and_then(Value::as_bool) == Some(true) {
            let message = json
                .get("error_message")
                .and_then(Value::as_str)
                .unwrap_or("unknown error")
                .to_string();
            return Err(FlowError::ProviderRequestFailed {
                provider: Self::KEY.as_str().to_string(),
                status: Some(resp.status),
                message: Some(message),
            });
        }
        Ok(match json.get_mut("data") {
            Some(data) => data.take(),
            None => json,
        })
    }
}

/// Decode the `data` member of a transactions response into a page.
///
/// `data` is either the item array itself or an object with `items`. The next page
/// exists unless the response says otherwise through `links.next` or
/// `pagination.has_more`.
fn decode_page(data: Value, page_number: u32) -> Result<RawPage, FlowError> {
    let provider = CovalentProvider::KEY.as_str();
    let (items, continues) = match data {
        Value::Array(items) => (Value::Array(items), true),
        Value::Object(mut obj) => {
            let continues = if let Some(links) = obj.get("links").filter(|l| l.is_object()) {
                links.get("next").is_some_and(|n| !n.is_null())
            } else if let Some(more) = obj
                .get("pagination")
                .and_then(|p| p.get("has_more"))
                .and_then(Value::as_bool)
            {
                more
            } else {
                true
            };
            let items = obj.remove("items").unwrap_or(Value::Array(Vec::new()));
            (items, continues)
        }
        Value::Null => (Value::Array(Vec::new()), false),
        other => {
            return Err(FlowError::malformed(
                provider,
                format!("unexpected data shape: {other}"),
            ));
        }
    };
    let items = if items.is_null() {
        Vec::new()
    } else {
        serde_json::from_value::<Vec<RawTransaction>>(items)
            .map_err(|e| FlowError::malformed(provider, e.to_string()))?
    };
    let continuation = continues.then(|| Continuation::Page(page_number.saturating_add(1)));
    Ok(RawPage::new(items, continuation))
}

#[async_trait]
impl TransactionProvider for CovalentProvider {
    fn name(&self) -> &'static str {
        Self::KEY.as_str()
    }

    fn vendor(&self) -> &'static str {
        "Covalent"
    }

    fn ensure_ready(&self) -> Result<(), FlowError> {
        self.credential().map(|_| ())
    }

    fn default_max_pages(&self) -> u32 {
        Self::DEFAULT_MAX_PAGES
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow_http::covalent::fetch_page",
            skip(self, page),
            fields(chain = %chain, page_number = page.page_number, page_size = page.page_size),
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
        let url = self.transactions_url(chain, address, page);
        let data = self.get_data(url).await?;
        decode_page(data, page.page_number)
    }

    fn as_transaction_details_provider(&self) -> Option<&dyn TransactionDetailsProvider> {
        Some(self as &dyn TransactionDetailsProvider)
    }
}

#[async_trait]
impl TransactionDetailsProvider for CovalentProvider {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow_http::covalent::transaction_details",
            skip(self),
            fields(chain = %chain),
            err,
        )
    )]
    async fn transaction_details(&self, chain: ChainId, tx_hash: &str) -> Result<Value, FlowError> {
        self.credential()?;
        let chain = chain.to_string();
        let url = join_segments(&self.base_url, &[&chain, "transaction_v3", tx_hash, ""]);
        self.get_data(url).await
    }
}

/// Builder for [`CovalentProvider`].
#[derive(Default)]
pub struct CovalentBuilder {
    credential: Option<Credential>,
    auth: AuthMode,
    base_url: Option<String>,
    http: Option<Arc<dyn HttpGet>>,
}

impl CovalentBuilder {
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

    /// Choose where the credential travels.
    #[must_use]
    pub const fn auth_mode(mut self, mode: AuthMode) -> Self {
        self.auth = mode;
        self
    }

    /// Override the API root (e.g. a proxy or a mock server).
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

    /// Build the provider. A missing credential is not an error here; it surfaces
    /// as `MissingCredential` before the first request.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable base URL or if the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<CovalentProvider, FlowError> {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or(CovalentProvider::DEFAULT_BASE_URL);
        let base_url = parse_base_url(CovalentProvider::KEY.as_str(), base)?;
        let http: Arc<dyn HttpGet> = match self.http {
            Some(h) => h,
            None => Arc::new(RealAdapter::new()?),
        };
        Ok(CovalentProvider {
            http,
            base_url,
            credential: self.credential,
            auth: self.auth,
        })
    }
}
