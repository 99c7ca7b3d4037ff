//! Compute the input hash for a manifest without touching any cache.
//!
//! Useful for debugging key mismatches: prints exactly the digest the
//! restore flow would embed in the site cache key.

use super::super::args::HashArgs;
use crate::exit_codes::{FAILURE, SUCCESS};
use mncache_core::hash::compute_input_hash;
use mncache_core::manifest::parse_manifest_str;
use mncache_core::patterns::resolve_hash_patterns;
use mncache_core::{CacheError, CacheSettings};
use tracing::warn;

pub async fn run(args: HashArgs) -> anyhow::Result<i32> {
    let settings =
        CacheSettings::from_inputs(&args.cache_site_for_manifest, &args.extra_input, "")?;
    if settings.manifest_path.is_empty() {
        return Err(CacheError::Validation("a manifest path is required".to_string()).into());
    }

    let content = tokio::fs::read_to_string(&settings.manifest_path).await?;
    let manifest = parse_manifest_str(&content)?;
    let patterns =
        resolve_hash_patterns(&settings.manifest_path, &manifest, &settings.extra_input)?;

    match compute_input_hash(&patterns).await {
        Some(hash) => {
            println!("{hash}");
            Ok(SUCCESS)
        }
        None => {
            warn!("no files matched the manifest inputs; nothing to hash");
            Ok(FAILURE)
        }
    }
}
