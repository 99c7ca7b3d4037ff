//! The CI restore flow: system asset groups first, then the site cache when
//! a manifest was supplied.

use super::super::args::RestoreArgs;
use crate::exit_codes::SUCCESS;
use crate::outputs::{self, set_output};
use mncache_core::cache::{
    cache_site_output, restore_system_assets, save_system_assets, LocalCacheStore,
};
use mncache_core::env::SystemEnv;
use mncache_core::CacheSettings;
use std::path::PathBuf;
use tracing::info;

pub async fn run(args: RestoreArgs) -> anyhow::Result<i32> {
    let settings = CacheSettings::from_inputs(
        &args.cache_site_for_manifest,
        &args.extra_input,
        &args.cache_site_path,
    )?;

    let store = LocalCacheStore::new(resolve_cache_dir(args.cache_dir));
    let env = SystemEnv;

    restore_system_assets(&store, &env).await;
    if args.save_system_caches {
        save_system_assets(&store, &env).await;
    }

    if settings.manifest_path.is_empty() {
        info!("no manifest specified, skipping site cache");
        return Ok(SUCCESS);
    }

    let outcome = cache_site_output(&store, &settings).await?;
    if let Some(hash) = &outcome.input_hash {
        set_output(outputs::HASH, hash)?;
    }
    set_output(
        outputs::CACHE_SITE_CACHE_HIT,
        if outcome.cache_hit { "true" } else { "false" },
    )?;

    Ok(SUCCESS)
}

/// Explicit dir, else the platform cache dir, else a local fallback.
fn resolve_cache_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs::cache_dir()
            .map(|dir| dir.join("mncache"))
            .unwrap_or_else(|| PathBuf::from(".mncache"))
    })
}
