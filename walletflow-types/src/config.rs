//! Configuration types shared across the orchestrator and providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where a provider credential is attached on outgoing requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum AuthMode {
    /// Credential travels as a query parameter.
    #[default]
    Query,
    /// Credential travels in a request header.
    Header,
}

impl AuthMode {
    /// Parse `query` / `header` (case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            _ => None,
        }
    }
}

/// Parameters of the pass-through (relay hop) collapser.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollapseConfig {
    /// Whether the timeline pipeline collapses relay hops at all.
    pub enabled: bool,
    /// Maximum delay between the inbound and the outbound leg.
    pub window: Duration,
    /// Relative amount tolerance, e.g. `0.01` for 1%.
    pub amount_tolerance: f64,
}

impl CollapseConfig {
    /// Default matching window (60 minutes).
    pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60 * 60);
    /// Default relative amount tolerance (1%).
    pub const DEFAULT_TOLERANCE: f64 = 0.01;

    /// Build an enabled configuration with explicit window and tolerance.
    #[must_use]
    pub const fn new(window: Duration, amount_tolerance: f64) -> Self {
        Self {
            enabled: true,
            window,
            amount_tolerance,
        }
    }

    /// A configuration that leaves the timeline untouched.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            window: Self::DEFAULT_WINDOW,
            amount_tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW, Self::DEFAULT_TOLERANCE)
    }
}

/// Global configuration for the `Walletflow` orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletflowConfig {
    /// Maximum number of chains fetched concurrently (>= 1).
    pub concurrency: usize,
    /// Records requested per page.
    pub page_size: u32,
    /// Hard ceiling on pages per chain; `None` uses the provider's default.
    pub max_pages: Option<u32>,
    /// Pacing delay between consecutive page requests of one chain.
    pub page_delay: Duration,
    /// Optional timeout applied to each individual page request.
    pub provider_timeout: Option<Duration>,
    /// Relay-hop collapsing applied by the timeline pipeline.
    pub collapse: CollapseConfig,
}

impl Default for WalletflowConfig {
    fn default() -> Self {
        Self {
            concurrency: 2,
            page_size: 100,
            max_pages: None,
            page_delay: Duration::from_millis(200),
            provider_timeout: Some(Duration::from_secs(30)),
            collapse: CollapseConfig::default(),
        }
    }
}
