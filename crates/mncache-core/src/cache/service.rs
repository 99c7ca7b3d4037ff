//! Boundary to the cache service holding persisted blobs.

use async_trait::async_trait;
use std::path::PathBuf;

/// Opaque key-value blob store for cached bytes.
///
/// `restore` returns the key that actually matched: the primary key on an
/// exact hit, one of `restore_keys` on a fallback (prefix) match, or `None`
/// on a miss. Transient service failures surface as errors; callers contain
/// them and degrade to "no cache available" rather than aborting the run.
#[async_trait]
pub trait CacheService: Send + Sync {
    async fn restore(
        &self,
        paths: &[PathBuf],
        primary_key: &str,
        restore_keys: &[String],
    ) -> anyhow::Result<Option<String>>;

    /// Persist `paths` under `key`. The CI restore flow never calls this;
    /// saving is delegated to the job runner's end-of-job step.
    async fn save(&self, paths: &[PathBuf], key: &str) -> anyhow::Result<()>;
}
