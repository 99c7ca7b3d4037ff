//! System asset cache coordinator.
//!
//! Restores each asset group independently: tilde-expands its candidate
//! paths, keeps the ones present on disk and issues one restore per group
//! with the group key as both primary and sole fallback key. A failing group
//! never prevents the others from being attempted.

use crate::cache::groups::{CacheGroup, SYSTEM_CACHE_GROUPS};
use crate::cache::service::CacheService;
use crate::env::{expand_tilde, EnvProvider};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Restore every system asset group. Never fails; all errors are logged.
///
/// Restore-only: saving is delegated to the job runner's end-of-job step,
/// which runs after the build has actually populated these directories.
pub async fn restore_system_assets(cache: &dyn CacheService, env: &dyn EnvProvider) {
    restore_asset_groups(cache, env, SYSTEM_CACHE_GROUPS).await;
    info!("system cache restore operations completed");
}

/// Restore an explicit set of asset groups, one isolated attempt per group.
pub async fn restore_asset_groups(
    cache: &dyn CacheService,
    env: &dyn EnvProvider,
    groups: &[CacheGroup],
) {
    for group in groups {
        restore_group(cache, env, group).await;
    }
}

/// Save pass for deployments without an end-of-job cache step: persists each
/// system group's existing paths under its fixed key.
pub async fn save_system_assets(cache: &dyn CacheService, env: &dyn EnvProvider) {
    save_asset_groups(cache, env, SYSTEM_CACHE_GROUPS).await;
}

/// Save an explicit set of asset groups; failures stay per-group.
pub async fn save_asset_groups(
    cache: &dyn CacheService,
    env: &dyn EnvProvider,
    groups: &[CacheGroup],
) {
    for group in groups {
        let existing = existing_paths(group.paths, env);
        if existing.is_empty() {
            debug!("nothing to save for {}", group.name);
            continue;
        }
        match cache.save(&existing, group.key).await {
            Ok(()) => info!("{} cache saved under key: {}", group.name, group.key),
            Err(err) => warn!("{} cache save failed: {err:#}", group.name),
        }
    }
}

async fn restore_group(cache: &dyn CacheService, env: &dyn EnvProvider, group: &CacheGroup) {
    let existing = existing_paths(group.paths, env);
    if existing.is_empty() {
        info!("no existing {} directories found to restore into", group.name);
        return;
    }

    debug!(
        "attempting to restore {} cache to paths: {}",
        group.name,
        existing
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let fallback = vec![group.key.to_string()];
    match cache.restore(&existing, group.key, &fallback).await {
        Ok(Some(key)) => info!("{} cache restored from key: {key}", group.name),
        Ok(None) => info!("{} cache not found (first run or cache expired)", group.name),
        Err(err) => warn!("{} cache restore failed: {err:#}", group.name),
    }
}

/// Tilde-expand candidates and keep those present on disk. `Path::exists`
/// reports false on permission errors, so inaccessible paths are skipped
/// rather than failing the group.
fn existing_paths(paths: &[&str], env: &dyn EnvProvider) -> Vec<PathBuf> {
    let mut existing = Vec::new();
    for candidate in paths {
        let expanded = PathBuf::from(expand_tilde(candidate, env));
        if expanded.exists() {
            existing.push(expanded);
        } else {
            debug!("path does not exist, skipping: {candidate}");
        }
    }
    existing
}
