#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use walletflow_core::FlowError;

/// A received HTTP response: status code plus body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body text.
    pub body: String,
}

impl HttpResponse {
    /// Build a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport abstraction (so we can inject mocks in tests).
///
/// Errors are transport-level diagnostics (DNS, TLS, connection reset); HTTP error
/// statuses are returned as ordinary responses.
#[async_trait]
pub trait HttpGet: Send + Sync {
    /// Issue a GET with the given extra headers.
    async fn get(&self, url: Url, headers: &[(&'static str, String)]) -> Result<HttpResponse, String>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
}

impl RealAdapter {
    /// User agent sent with every request.
    pub const USER_AGENT: &'static str = concat!("walletflow/", env!("CARGO_PKG_VERSION"));

    /// Build a transport with a fresh client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the HTTP client cannot be initialized (e.g. TLS backend failure).
    pub fn new() -> Result<Self, FlowError> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()
            .map_err(|e| FlowError::InvalidArg(format!("http client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpGet for RealAdapter {
    async fn get(&self, url: Url, headers: &[(&'static str, String)]) -> Result<HttpResponse, String> {
        let mut req = self.client.get(url);
        for (name, value) in headers {
            req = req.header(*name, value);
        }
        // without_url: the query string may carry the credential
        let resp = req.send().await.map_err(|e| e.without_url().to_string())?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.without_url().to_string())?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(feature = "test-adapters")]
impl dyn HttpGet {
    /// Build an `HttpGet` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn HttpGet>
    where
        F: Send + Sync + 'static + Fn(&Url, &[(&'static str, String)]) -> Result<HttpResponse, String>,
    {
        struct FnHttp<F>(F);
        #[async_trait]
        impl<F> HttpGet for FnHttp<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(&Url, &[(&'static str, String)]) -> Result<HttpResponse, String>,
        {
            async fn get(
                &self,
                url: Url,
                headers: &[(&'static str, String)],
            ) -> Result<HttpResponse, String> {
                (self.0)(&url, headers)
            }
        }
        Arc::new(FnHttp(f))
    }
}
