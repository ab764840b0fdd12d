use walletflow_core::{Activity, ChainId, FlowError, collapse, merge, normalize_page};

use crate::Walletflow;

impl Walletflow {
    /// Build a wallet's unified timeline.
    ///
    /// Fetches every chain, normalizes the raw records, merges them with
    /// `file_activities` (provider records win on id collisions), and, when the
    /// configured [`CollapseConfig`](walletflow_core::CollapseConfig) is enabled,
    /// folds relay hops into single activities. The result is newest first. Chains
    /// that fail contribute nothing.
    ///
    /// # Errors
    /// Returns `MissingCredential` when the provider has no credential.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "walletflow::router::timeline",
            skip(self, chain_ids, file_activities),
            fields(chains = chain_ids.len(), file_records = file_activities.len()),
            err,
        )
    )]
    pub async fn timeline(
        &self,
        chain_ids: &[ChainId],
        address: &str,
        file_activities: Vec<Activity>,
    ) -> Result<Vec<Activity>, FlowError> {
        let results = self.fetch_all_chains(chain_ids, address).await?;
        let api: Vec<Activity> = results
            .iter()
            .flat_map(|r| normalize_page(&r.items, r.chain_id))
            .collect();
        let merged = merge(api, file_activities);
        if self.cfg.collapse.enabled {
            Ok(collapse(&merged, &self.cfg.collapse))
        } else {
            Ok(merged)
        }
    }
}
