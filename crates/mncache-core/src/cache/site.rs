//! Site output cache coordinator.
//!
//! Derives the input hash for a manifest and restores the rendered site
//! directory under `metanorma-site-cache-<hash>`, with the bare prefix as the
//! sole fallback key so a stale site can still seed an incremental rebuild.

use crate::cache::groups::SITE_CACHE_KEY_PREFIX;
use crate::cache::service::CacheService;
use crate::hash::compute_input_hash;
use crate::manifest::{manifest_dir, parse_manifest_str};
use crate::patterns::resolve_hash_patterns;
use crate::settings::CacheSettings;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of one site-cache run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCacheOutcome {
    /// Hex digest of the build inputs; `None` when nothing matched.
    pub input_hash: Option<String>,
    /// Key the cache service matched, exact or fallback.
    pub restored_key: Option<String>,
    /// True only when the restored key equals the exact requested key; a
    /// fallback-prefix match is a partial restore, not a hit.
    pub cache_hit: bool,
}

impl SiteCacheOutcome {
    fn nothing_to_key_on() -> Self {
        Self {
            input_hash: None,
            restored_key: None,
            cache_hit: false,
        }
    }
}

/// Run the site cache flow for a validated [`CacheSettings`].
///
/// Manifest read/parse failures and pattern validation failures propagate:
/// they are actionable configuration problems. A failing restore call is
/// logged and reported as a miss instead, so a flaky cache service degrades
/// the run rather than aborting it.
pub async fn cache_site_output(
    cache: &dyn CacheService,
    settings: &CacheSettings,
) -> Result<SiteCacheOutcome> {
    let manifest_path = settings.manifest_path.as_str();
    let content = tokio::fs::read_to_string(manifest_path)
        .await
        .with_context(|| format!("failed to read manifest {manifest_path}"))?;
    let manifest = parse_manifest_str(&content)?;

    info!("manifest path: {manifest_path}");
    info!("source files: {}", manifest.source_files().join(", "));
    info!("manifest directory: {}", manifest_dir(manifest_path));

    let patterns = resolve_hash_patterns(manifest_path, &manifest, &settings.extra_input)?;
    let Some(input_hash) = compute_input_hash(&patterns).await else {
        warn!("no input hash generated, skipping site cache");
        return Ok(SiteCacheOutcome::nothing_to_key_on());
    };

    let cache_key = format!("{SITE_CACHE_KEY_PREFIX}{input_hash}");
    let paths = vec![PathBuf::from(&settings.site_path)];
    let fallback = vec![SITE_CACHE_KEY_PREFIX.to_string()];

    let restored_key = match cache.restore(&paths, &cache_key, &fallback).await {
        Ok(restored) => restored,
        Err(err) => {
            warn!("site cache restore failed: {err:#}");
            None
        }
    };

    match &restored_key {
        Some(key) => info!("site cache restored from key: {key}"),
        None => info!("site cache not found"),
    }

    let cache_hit = restored_key.as_deref() == Some(cache_key.as_str());
    Ok(SiteCacheOutcome {
        input_hash: Some(input_hash),
        restored_key,
        cache_hit,
    })
}
