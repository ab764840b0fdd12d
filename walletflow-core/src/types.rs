//! Re-export of foundational types from `walletflow-types`.
// Consolidated re-exports so downstream crates can depend on `walletflow-core` only

pub use walletflow_types::{
    Activity, ActivityMeta, ActivityType, AuthMode, Capability, Chain, ChainId, CollapseConfig,
    Credential, DEFAULT_CHAINS, FetchResult, FlowError, ProviderKey, WalletflowConfig,
    normalize_address,
};
