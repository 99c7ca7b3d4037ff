//! Pattern resolver: manifest plus extra input → glob pattern set.
//!
//! Every declared source file contributes its whole containing directory as a
//! recursive pattern, since a document's output typically depends on sibling
//! includes and assets the manifest does not enumerate. Extra-input entries
//! are joined onto the manifest directory verbatim.

use crate::errors::CacheError;
use crate::manifest::{manifest_dir, MetanormaManifest};
use std::collections::BTreeSet;

/// Patterns that would match far too much (or nothing meaningful); always
/// stripped from the resolved set.
const DEGENERATE_PATTERNS: [&str; 5] = ["**", ".", "", "...", "./.."];

/// Resolve the set of glob patterns whose expansion feeds the input hash.
///
/// Manifest-derived patterns equal to `<base>/**` are excluded (a source file
/// sitting directly beside the manifest would otherwise pull in the whole
/// manifest directory). Extra-input splits on commas and newlines; an entry
/// containing `..` is a hard validation failure, not a silent drop. Returns
/// an empty set when nothing is declared and no extra input was given.
pub fn resolve_hash_patterns(
    manifest_path: &str,
    manifest: &MetanormaManifest,
    extra_input: &str,
) -> Result<BTreeSet<String>, CacheError> {
    let base = manifest_dir(manifest_path);
    let too_broad = join_segments(&[&base, "**"]);

    let mut patterns = BTreeSet::new();
    for file in manifest.source_files() {
        let pattern = join_segments(&[&base, dirname(file), "**"]);
        if pattern == too_broad || has_traversal_segment(&pattern) {
            continue;
        }
        patterns.insert(pattern);
    }

    for entry in extra_input.split(['\n', ',']) {
        let trimmed = entry.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.contains("..") {
            return Err(CacheError::Validation(format!(
                "extra input path \"{trimmed}\" contains \"..\", which is not allowed"
            )));
        }
        patterns.insert(join_segments(&[&base, trimmed]));
    }

    for degenerate in DEGENERATE_PATTERNS {
        patterns.remove(degenerate);
    }

    Ok(patterns)
}

/// Parent directory of a slash-separated path; `"."` for bare file names,
/// `"/"` for direct children of the root.
fn dirname(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None => ".",
    }
}

/// Join path segments, collapsing `"."` and empty segments so a base
/// directory of `"."` never prefixes the result.
fn join_segments(segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for segment in segments {
        for part in segment.split('/') {
            if part.is_empty() || part == "." {
                continue;
            }
            parts.push(part);
        }
    }
    if parts.is_empty() {
        return ".".to_string();
    }
    let joined = parts.join("/");
    if segments.first().is_some_and(|s| s.starts_with('/')) {
        format!("/{joined}")
    } else {
        joined
    }
}

fn has_traversal_segment(path: &str) -> bool {
    path.split('/').any(|part| part == "..")
}
