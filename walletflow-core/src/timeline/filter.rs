use serde::{Deserialize, Serialize};

use walletflow_types::{Activity, ActivityType, ChainId};

/// Post-merge view filter.
///
/// `None` for `chains`/`types` admits everything. A `min_usd` threshold or
/// `only_usd_valued` drops records without a USD estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityFilter {
    /// Allowed chains.
    pub chains: Option<Vec<ChainId>>,
    /// Allowed activity types.
    pub types: Option<Vec<ActivityType>>,
    /// Minimum USD estimate (inclusive).
    pub min_usd: Option<f64>,
    /// Drop records without a USD estimate.
    pub only_usd_valued: bool,
}

impl ActivityFilter {
    /// Smallest accepted `min_usd` threshold.
    pub const MIN_USD_FLOOR: f64 = 0.01;

    /// A filter that admits everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to the given chains.
    #[must_use]
    pub fn chains(mut self, chains: impl IntoIterator<Item = ChainId>) -> Self {
        self.chains = Some(chains.into_iter().collect());
        self
    }

    /// Restrict to the given activity types.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = ActivityType>) -> Self {
        self.types = Some(types.into_iter().collect());
        self
    }

    /// Require a USD estimate of at least `usd` (floored at one cent).
    #[must_use]
    pub fn min_usd(mut self, usd: f64) -> Self {
        self.min_usd = Some(usd.max(Self::MIN_USD_FLOOR));
        self
    }

    /// Drop records without a USD estimate.
    #[must_use]
    pub const fn only_usd_valued(mut self, yes: bool) -> Self {
        self.only_usd_valued = yes;
        self
    }

    /// Whether `a` passes the filter.
    #[must_use]
    pub fn matches(&self, a: &Activity) -> bool {
        if let Some(chains) = &self.chains {
            if !chains.contains(&a.chain_id) {
                return false;
            }
        }
        if let Some(types) = &self.types {
            if !types.contains(&a.kind) {
                return false;
            }
        }
        match (a.amount_usd, self.min_usd) {
            (None, Some(_)) => false,
            (None, None) => !self.only_usd_valued,
            (Some(usd), Some(min)) => usd >= min,
            (Some(_), None) => true,
        }
    }

    /// Keep the activities that pass, preserving order.
    #[must_use]
    pub fn apply(&self, items: Vec<Activity>) -> Vec<Activity> {
        items.into_iter().filter(|a| self.matches(a)).collect()
    }
}
