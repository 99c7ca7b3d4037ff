//! Metanorma manifest model.
//!
//! A manifest (`metanorma.yml`) is a YAML mapping whose only relevant part
//! here is `metanorma.source.files`. Any nesting level may be absent, and
//! unrelated top-level keys are tolerated and ignored.

use crate::errors::CacheError;
use serde::Deserialize;
use std::path::Path;

/// Parsed manifest. Every level is optional; an empty document is valid.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetanormaManifest {
    #[serde(default)]
    pub metanorma: Option<MetanormaSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetanormaSection {
    #[serde(default)]
    pub source: Option<SourceSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceSection {
    #[serde(default)]
    pub files: Option<Vec<String>>,
}

impl MetanormaManifest {
    /// Declared source document paths, or an empty slice when any nesting
    /// level is absent.
    pub fn source_files(&self) -> &[String] {
        self.metanorma
            .as_ref()
            .and_then(|m| m.source.as_ref())
            .and_then(|s| s.files.as_deref())
            .unwrap_or(&[])
    }
}

/// Parse manifest text into a [`MetanormaManifest`].
///
/// A leading UTF-8 byte-order mark is stripped. Empty and comment-only
/// documents parse to the default (empty) manifest rather than an error.
pub fn parse_manifest_str(content: &str) -> Result<MetanormaManifest, CacheError> {
    let text = content.strip_prefix('\u{feff}').unwrap_or(content);
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if matches!(value, serde_yaml::Value::Null) {
        return Ok(MetanormaManifest::default());
    }
    Ok(serde_yaml::from_value(value)?)
}

/// Directory containing the manifest; `"."` when the path has no directory
/// component.
pub fn manifest_dir(manifest_path: &str) -> String {
    match Path::new(manifest_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.to_string_lossy().into_owned()
        }
        _ => ".".to_string(),
    }
}
