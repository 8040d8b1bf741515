use chrono::{DateTime, Utc};
use recency::config::{BoostingConfig, ConfigLoader, RecencyConfig};
use recency::recency::FixedClock;
use recency::search::{Bm25Similarity, RecencySimilarity};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Effective configuration plus the instant every command measures recency against.
pub struct CliContext {
    pub config: RecencyConfig,
    pub now: DateTime<Utc>,
}

impl CliContext {
    /// Load configuration from the default locations, an optional explicit
    /// file and `RECENCY_*` environment variables, in that order.
    pub fn new(config_path: Option<&Path>, now: DateTime<Utc>) -> recency::Result<Self> {
        let mut loader = ConfigLoader::new();
        loader.load_default_files();
        if let Some(path) = config_path {
            loader.load_file(path)?;
        }
        loader.load_env();

        let config = loader.extract()?;
        debug!(
            policy = %config.boosting.policy,
            reference_epoch = %config.boosting.reference_epoch,
            now = %now,
            "Loaded CLI configuration"
        );
        Ok(Self { config, now })
    }

    pub fn with_config(config: RecencyConfig, now: DateTime<Utc>) -> Self {
        Self { config, now }
    }

    pub fn base_similarity(&self) -> recency::Result<Bm25Similarity> {
        Ok(Bm25Similarity::from_config(&self.config.bm25)?)
    }

    /// Recency-boosted BM25 pinned to `self.now`.
    pub fn similarity(
        &self,
        boosting: &BoostingConfig,
    ) -> recency::Result<RecencySimilarity<Bm25Similarity>> {
        let similarity = RecencySimilarity::from_config(self.base_similarity()?, boosting)?;
        Ok(similarity.with_clock(Arc::new(FixedClock(self.now))))
    }
}
