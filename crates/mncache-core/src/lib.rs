//! Core library for the `mncache` CI cache helper.
//!
//! Derives a deterministic cache key from a Metanorma build manifest and
//! restores system-level asset caches plus the rendered site output through
//! an opaque cache service. The key derivation pipeline is
//! manifest → pattern set → sorted file list → one SHA-256 digest.

pub mod cache;
pub mod env;
pub mod errors;
pub mod hash;
pub mod manifest;
pub mod patterns;
pub mod settings;

pub use errors::CacheError;
pub use settings::CacheSettings;
