//! Hash engine: glob pattern set → one deterministic SHA-256 digest.
//!
//! Matched files are deduplicated and sorted before hashing, so the digest
//! depends only on the file set and its contents, never on glob-expansion or
//! filesystem iteration order. Any future parallel file reading must keep
//! folding in sorted order, not completion order.

use globset::Glob;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

const GLOB_META: [char; 4] = ['*', '?', '[', '{'];

/// Hash every file matched by `patterns` into one lowercase hex digest.
///
/// Returns `None` when the pattern set is empty or no files match.
/// Per-pattern expansion failures and per-file read failures are logged and
/// skipped; they never abort the computation.
pub async fn compute_input_hash(patterns: &BTreeSet<String>) -> Option<String> {
    if patterns.is_empty() {
        warn!("no hash patterns generated");
        return None;
    }

    info!(
        "input directories:\n{}",
        patterns.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
    );

    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    for pattern in patterns {
        match expand_pattern(pattern) {
            Ok(matched) => files.extend(matched),
            Err(err) => warn!("failed to expand pattern {pattern}: {err:#}"),
        }
    }

    if files.is_empty() {
        warn!("no files found matching patterns");
        return None;
    }

    info!("found {} files for hashing", files.len());

    let mut hasher = Sha256::new();
    for file in &files {
        match tokio::fs::read(file).await {
            Ok(bytes) => hasher.update(&bytes),
            Err(err) => warn!("failed to read file {}: {err}", file.display()),
        }
    }

    let digest = hex::encode(hasher.finalize());
    info!("input hash: {digest}");
    Some(digest)
}

/// Expand one pattern to the files it matches, as absolute paths.
/// Directories never match; a glob-free pattern names at most one file.
fn expand_pattern(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    if !pattern.contains(GLOB_META) {
        let path = Path::new(pattern);
        if path.is_file() {
            return Ok(vec![absolutize(path)]);
        }
        return Ok(Vec::new());
    }

    let matcher = Glob::new(pattern)?.compile_matcher();
    let root = walk_root(pattern);
    if !root.exists() {
        debug!("pattern root {} does not exist", root.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("failed to walk below {}: {err}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if matcher.is_match(entry.path()) {
            files.push(absolutize(entry.path()));
        }
    }
    Ok(files)
}

/// Longest leading run of pattern components free of glob metacharacters;
/// the directory the expansion walks from.
fn walk_root(pattern: &str) -> PathBuf {
    let mut root = PathBuf::new();
    for part in pattern.split('/') {
        if part.contains(GLOB_META) {
            break;
        }
        if part.is_empty() {
            root.push("/");
        } else {
            root.push(part);
        }
    }
    if root.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        root
    }
}

/// Canonicalize to an absolute path, resolving symlinks; falls back to the
/// path as matched when resolution fails (e.g. file vanished mid-run).
fn absolutize(path: &Path) -> PathBuf {
    match std::fs::canonicalize(path) {
        Ok(absolute) => absolute,
        Err(err) => {
            debug!("failed to canonicalize {}: {err}", path.display());
            path.to_path_buf()
        }
    }
}
