//! Validated per-invocation settings.

use crate::errors::CacheError;
use std::path::Path;

/// Default rendered-site directory when none is configured.
pub const DEFAULT_SITE_PATH: &str = "_site";

/// Immutable settings for one cache run, validated on construction and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct CacheSettings {
    /// Path to the `metanorma.yml` manifest; empty restores system assets only.
    pub manifest_path: String,
    /// Extra directories that affect the build, comma or newline separated,
    /// resolved relative to the manifest directory.
    pub extra_input: String,
    /// Rendered site output directory.
    pub site_path: String,
}

impl CacheSettings {
    /// Build settings from raw string inputs, applying defaults and the fatal
    /// validation rules for user-supplied paths.
    pub fn from_inputs(
        manifest_path: &str,
        extra_input: &str,
        site_path: &str,
    ) -> Result<Self, CacheError> {
        let manifest_path = manifest_path.trim().to_string();
        let extra_input = extra_input.trim().to_string();
        let mut site_path = site_path.trim().to_string();
        if site_path.is_empty() {
            site_path = DEFAULT_SITE_PATH.to_string();
        }

        if !manifest_path.is_empty() {
            validate_manifest_path(&manifest_path)?;
        }
        validate_site_path(&site_path)?;

        Ok(Self {
            manifest_path,
            extra_input,
            site_path,
        })
    }
}

fn validate_manifest_path(path: &str) -> Result<(), CacheError> {
    if path.starts_with('~') {
        return Err(CacheError::Validation(format!(
            "path \"{path}\" starts with ~, which the runner does not expand; use an absolute path instead"
        )));
    }
    let manifest = Path::new(path);
    if !manifest.exists() {
        return Err(CacheError::Validation(format!(
            "manifest file \"{path}\" does not exist"
        )));
    }
    if manifest.is_dir() {
        return Err(CacheError::Validation(format!(
            "path \"{path}\" is a directory, not a file"
        )));
    }
    let extension = manifest
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    if !matches!(extension.as_deref(), Some("yml") | Some("yaml")) {
        return Err(CacheError::Validation(format!(
            "manifest file \"{path}\" must have a .yml or .yaml extension"
        )));
    }
    Ok(())
}

fn validate_site_path(path: &str) -> Result<(), CacheError> {
    if path.starts_with('~') {
        return Err(CacheError::Validation(format!(
            "path \"{path}\" starts with ~, which the runner does not expand; use an absolute path instead"
        )));
    }
    if path.contains("..") {
        return Err(CacheError::Validation(format!(
            "path \"{path}\" contains \"..\", which is not allowed"
        )));
    }
    Ok(())
}
