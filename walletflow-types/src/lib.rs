//! Walletflow data transfer objects and configuration primitives shared by every crate
//! in the workspace.
#![warn(missing_docs)]

mod activity;
mod capability;
mod chain;
mod config;
mod connector;
mod credential;
mod error;
mod reports;

pub use activity::{Activity, ActivityMeta, ActivityType, normalize_address};
pub use capability::Capability;
pub use chain::{Chain, ChainId, DEFAULT_CHAINS};
pub use config::{AuthMode, CollapseConfig, WalletflowConfig};
pub use connector::ProviderKey;
pub use credential::Credential;
pub use error::FlowError;
pub use reports::FetchResult;
