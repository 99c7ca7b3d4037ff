//! Filesystem-backed cache store.
//!
//! One gzip-compressed tar archive per key under a root directory. Entry
//! names record where the bytes came from (`abs/<path>` for absolute paths,
//! `rel/<path>` for working-directory-relative ones), so a restore puts them
//! back without consulting the requested path list. Entry paths containing
//! `..` are rejected on both the save and restore side.

use crate::cache::service::CacheService;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;
use flate2::{Compression, GzBuilder};
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

const ARCHIVE_EXT: &str = ".tar.gz";

/// [`CacheService`] implementation storing archives on the local filesystem.
pub struct LocalCacheStore {
    root: PathBuf,
}

impl LocalCacheStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn archive_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{ARCHIVE_EXT}", sanitize_key(key)))
    }

    /// Exact key first, then the newest archive whose key starts with a
    /// fallback key, in fallback order. A missing store root is a miss.
    fn lookup(&self, primary_key: &str, restore_keys: &[String]) -> Option<(String, PathBuf)> {
        let exact = self.archive_path(primary_key);
        if exact.is_file() {
            return Some((primary_key.to_string(), exact));
        }

        let entries = std::fs::read_dir(&self.root).ok()?;
        let mut archives: Vec<(String, PathBuf, SystemTime)> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(key) = name.strip_suffix(ARCHIVE_EXT) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            archives.push((key.to_string(), path, modified));
        }

        for fallback in restore_keys {
            let prefix = sanitize_key(fallback);
            if let Some((key, path, _)) = archives
                .iter()
                .filter(|(key, _, _)| key.starts_with(&prefix))
                .max_by_key(|(_, _, modified)| *modified)
            {
                return Some((key.clone(), path.clone()));
            }
        }
        None
    }
}

#[async_trait]
impl CacheService for LocalCacheStore {
    async fn restore(
        &self,
        _paths: &[PathBuf],
        primary_key: &str,
        restore_keys: &[String],
    ) -> Result<Option<String>> {
        let Some((key, archive)) = self.lookup(primary_key, restore_keys) else {
            return Ok(None);
        };
        debug!("restoring archive {}", archive.display());
        unpack(&archive)?;
        Ok(Some(key))
    }

    async fn save(&self, paths: &[PathBuf], key: &str) -> Result<()> {
        std::fs::create_dir_all(&self.root).context("create cache store root")?;
        let dest = self.archive_path(key);
        let staging = dest.with_extension("tmp");
        pack(paths, &staging)?;
        std::fs::rename(&staging, &dest).context("publish archive")?;
        Ok(())
    }
}

fn pack(paths: &[PathBuf], dest: &Path) -> Result<()> {
    let file = File::create(dest)
        .with_context(|| format!("create archive {}", dest.display()))?;
    let gz = GzBuilder::new().mtime(0).write(file, Compression::default());
    let mut tar = tar::Builder::new(gz);
    tar.mode(tar::HeaderMode::Deterministic);

    for path in paths {
        let Some(name) = entry_name(path) else {
            debug!("skipping unarchivable path {}", path.display());
            continue;
        };
        if path.is_dir() {
            tar.append_dir_all(&name, path)
                .with_context(|| format!("archive {}", path.display()))?;
        } else if path.is_file() {
            tar.append_path_with_name(path, &name)
                .with_context(|| format!("archive {}", path.display()))?;
        }
    }

    let gz = tar.into_inner().context("finalize tar")?;
    gz.finish().context("finish gzip")?;
    Ok(())
}

fn unpack(archive: &Path) -> Result<()> {
    let file = File::open(archive)
        .with_context(|| format!("open archive {}", archive.display()))?;
    let mut tar = tar::Archive::new(GzDecoder::new(file));
    for entry in tar.entries().context("read archive")? {
        let mut entry = entry.context("read archive entry")?;
        let name = entry.path().context("entry path")?.into_owned();
        let Some(target) = restore_target(&name) else {
            bail!("archive contains invalid entry path: {}", name.display());
        };
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
        }
        entry
            .unpack(&target)
            .with_context(|| format!("unpack {}", target.display()))?;
    }
    Ok(())
}

/// `abs/<path>` for absolute paths, `rel/<path>` for relative ones; `None`
/// for anything carrying a traversal segment.
fn entry_name(path: &Path) -> Option<String> {
    let text = path.to_str()?;
    let normalized = text.replace('\\', "/");
    if normalized.split('/').any(|part| part == "..") {
        return None;
    }
    Some(match normalized.strip_prefix('/') {
        Some(stripped) => format!("abs/{stripped}"),
        None => format!("rel/{}", normalized.trim_start_matches("./")),
    })
}

/// Map an entry name back to its filesystem location, rejecting traversal
/// and unknown prefixes.
fn restore_target(name: &Path) -> Option<PathBuf> {
    let mut components = name.components();
    let prefix = components.next()?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty()
        || rest.components().any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    match prefix {
        Component::Normal(p) => match p.to_str() {
            Some("abs") => Some(Path::new("/").join(rest)),
            Some("rel") => Some(rest.to_path_buf()),
            _ => None,
        },
        _ => None,
    }
}

/// Keys become file names; anything outside a conservative set is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
