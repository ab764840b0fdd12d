use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::covalent::CovalentProvider;
use crate::moralis::MoralisProvider;
use walletflow_core::{AuthMode, Credential, FlowError, TransactionProvider};

/// Which HTTP provider to use, and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum HttpProviderConfig {
    /// Offset-paginated provider.
    Covalent {
        /// API key; `None` defers to a `MissingCredential` error at fetch time.
        #[serde(default, deserialize_with = "Credential::deserialize_optional")]
        api_key: Option<Credential>,
        /// API root override.
        #[serde(default)]
        base_url: Option<String>,
        /// Credential placement.
        #[serde(default)]
        auth: AuthMode,
    },
    /// Cursor-paginated provider.
    Moralis {
        /// API key; `None` defers to a `MissingCredential` error at fetch time.
        #[serde(default, deserialize_with = "Credential::deserialize_optional")]
        api_key: Option<Credential>,
        /// API root override.
        #[serde(default)]
        base_url: Option<String>,
    },
}

impl HttpProviderConfig {
    /// Selects the provider (`covalent` or `moralis`; default `covalent`).
    pub const PROVIDER_VAR: &'static str = "WALLETFLOW_PROVIDER";
    /// Covalent API key.
    pub const COVALENT_KEY_VAR: &'static str = "COVALENT_API_KEY";
    /// Covalent API root override.
    pub const COVALENT_BASE_VAR: &'static str = "COVALENT_BASE_URL";
    /// Covalent credential placement (`query` or `header`).
    pub const COVALENT_AUTH_VAR: &'static str = "COVALENT_AUTH";
    /// Moralis API key.
    pub const MORALIS_KEY_VAR: &'static str = "MORALIS_API_KEY";
    /// Moralis API root override.
    pub const MORALIS_BASE_VAR: &'static str = "MORALIS_BASE_URL";

    /// Read the configuration from process environment variables.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown provider name or credential placement.
    pub fn from_env() -> Result<Self, FlowError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown provider name or credential placement.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, FlowError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let provider = var(Self::PROVIDER_VAR)
            .map(|p| p.trim().to_ascii_lowercase())
            .unwrap_or_else(|| "covalent".to_string());
        match provider.as_str() {
            "covalent" => {
                let auth = match var(Self::COVALENT_AUTH_VAR) {
                    Some(raw) => AuthMode::parse(&raw).ok_or_else(|| {
                        FlowError::InvalidArg(format!(
                            "{}: expected 'query' or 'header', got '{raw}'",
                            Self::COVALENT_AUTH_VAR
                        ))
                    })?,
                    None => AuthMode::default(),
                };
                Ok(Self::Covalent {
                    api_key: var(Self::COVALENT_KEY_VAR).and_then(Credential::new),
                    base_url: var(Self::COVALENT_BASE_VAR),
                    auth,
                })
            }
            "moralis" => Ok(Self::Moralis {
                api_key: var(Self::MORALIS_KEY_VAR).and_then(Credential::new),
                base_url: var(Self::MORALIS_BASE_VAR),
            }),
            other => Err(FlowError::InvalidArg(format!(
                "{}: unknown provider '{other}'",
                Self::PROVIDER_VAR
            ))),
        }
    }

    /// Whether a credential is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        match self {
            Self::Covalent { api_key, .. } | Self::Moralis { api_key, .. } => api_key.is_some(),
        }
    }
}

/// Build the provider described by `config`.
///
/// # Errors
/// Returns `InvalidArg` for an unparsable base URL or if the HTTP client cannot be
/// created. A missing credential is not an error here.
pub fn connect(config: HttpProviderConfig) -> Result<Arc<dyn TransactionProvider>, FlowError> {
    let provider: Arc<dyn TransactionProvider> = match config {
        HttpProviderConfig::Covalent {
            api_key,
            base_url,
            auth,
        } => {
            let mut b = CovalentProvider::builder().credential(api_key).auth_mode(auth);
            if let Some(url) = base_url {
                b = b.base_url(url);
            }
            Arc::new(b.build()?)
        }
        HttpProviderConfig::Moralis { api_key, base_url } => {
            let mut b = MoralisProvider::builder().credential(api_key);
            if let Some(url) = base_url {
                b = b.base_url(url);
            }
            Arc::new(b.build()?)
        }
    };
    Ok(provider)
}
