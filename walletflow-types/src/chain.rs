//! Chain identifiers and the default chain registry.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Integer EVM chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Sentinel for records whose originating chain is unknown.
    pub const UNKNOWN: Self = Self(0);
    /// Ethereum mainnet.
    pub const ETHEREUM: Self = Self(1);
    /// Optimism.
    pub const OPTIMISM: Self = Self(10);
    /// BNB Smart Chain.
    pub const BNB: Self = Self(56);
    /// Polygon PoS.
    pub const POLYGON: Self = Self(137);
    /// Arbitrum One.
    pub const ARBITRUM: Self = Self(42161);
    /// Avalanche C-Chain.
    pub const AVALANCHE: Self = Self(43114);

    /// Returns the raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Lookup in the default registry.
    #[must_use]
    pub fn info(self) -> Option<&'static Chain> {
        DEFAULT_CHAINS.iter().find(|c| c.id == self)
    }
}

impl From<u64> for ChainId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display metadata for a supported chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chain {
    /// Numeric identifier.
    pub id: ChainId,
    /// Short human-friendly name.
    pub name: &'static str,
    /// Ticker-style abbreviation.
    pub short: &'static str,
}

/// Chains queried when the caller does not pick any.
pub const DEFAULT_CHAINS: &[Chain] = &[
    Chain {
        id: ChainId::ETHEREUM,
        name: "Ethereum",
        short: "ETH",
    },
    Chain {
        id: ChainId::BNB,
        name: "BNB",
        short: "BNB",
    },
    Chain {
        id: ChainId::POLYGON,
        name: "Polygon",
        short: "POL",
    },
    Chain {
        id: ChainId::OPTIMISM,
        name: "Optimism",
        short: "OP",
    },
    Chain {
        id: ChainId::ARBITRUM,
        name: "Arbitrum",
        short: "ARB",
    },
    Chain {
        id: ChainId::AVALANCHE,
        name: "Avalanche",
        short: "AVAX",
    },
];
