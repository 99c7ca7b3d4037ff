//! Error taxonomy for cache-key derivation.
//!
//! Only two kinds of failure are fatal to an invocation: unsafe or malformed
//! user configuration, and structurally invalid manifest syntax. Everything
//! else (cache-service rejections, pattern-expansion and file-read failures)
//! is contained at its call site and degrades the run to "no caching" instead
//! of aborting it.

use thiserror::Error;

/// Fatal errors surfaced to the operator. Never retried.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Malformed or unsafe user-supplied configuration (path traversal,
    /// shorthand home paths, wrong extension, missing manifest).
    #[error("input validation failed: {0}")]
    Validation(String),

    /// Structurally invalid manifest syntax.
    #[error("failed to parse manifest: {0}")]
    ManifestParse(#[from] serde_yaml::Error),
}
