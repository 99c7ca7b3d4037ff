//! End-to-end site cache flow: manifest → patterns → hash → keyed restore,
//! exercised against the bundled archive store and a scripted service.

use async_trait::async_trait;
use mncache_core::cache::{
    cache_site_output, CacheService, LocalCacheStore, SITE_CACHE_KEY_PREFIX,
};
use mncache_core::CacheSettings;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_project(root: &Path) -> String {
    let docs = root.join("documents");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("index.adoc"), "= Index\n").unwrap();
    fs::write(docs.join("section1.adoc"), "== Section 1\n").unwrap();

    let manifest = root.join("metanorma.yml");
    fs::write(
        &manifest,
        "metanorma:\n  source:\n    files:\n      - documents/index.adoc\n      - documents/section1.adoc\n",
    )
    .unwrap();
    manifest.to_string_lossy().into_owned()
}

fn settings_for(manifest: &str, site: &Path) -> CacheSettings {
    CacheSettings::from_inputs(manifest, "", site.to_str().unwrap()).unwrap()
}

#[tokio::test]
async fn first_run_reports_the_hash_and_misses() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    let settings = settings_for(&manifest, &project.path().join("_site"));
    let store = LocalCacheStore::new(store_root.path());

    let outcome = cache_site_output(&store, &settings).await.unwrap();

    assert!(!outcome.cache_hit);
    assert_eq!(outcome.restored_key, None);
    let hash = outcome.input_hash.unwrap();
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn unchanged_inputs_derive_the_same_key_twice() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    let settings = settings_for(&manifest, &project.path().join("_site"));
    let store = LocalCacheStore::new(store_root.path());

    let first = cache_site_output(&store, &settings).await.unwrap();
    let second = cache_site_output(&store, &settings).await.unwrap();
    assert_eq!(first.input_hash, second.input_hash);
}

#[tokio::test]
async fn a_saved_site_under_the_exact_key_is_a_hit() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    let site = project.path().join("_site");
    let settings = settings_for(&manifest, &site);
    let store = LocalCacheStore::new(store_root.path());

    let hash = cache_site_output(&store, &settings)
        .await
        .unwrap()
        .input_hash
        .unwrap();

    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("index.html"), "<html/>").unwrap();
    let key = format!("{SITE_CACHE_KEY_PREFIX}{hash}");
    store.save(&[site.clone()], &key).await.unwrap();
    fs::remove_dir_all(&site).unwrap();

    let outcome = cache_site_output(&store, &settings).await.unwrap();
    assert!(outcome.cache_hit);
    assert_eq!(outcome.restored_key, Some(key));
    assert!(site.join("index.html").is_file(), "site must be restored");
}

#[tokio::test]
async fn a_fallback_prefix_restore_is_not_a_hit() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    let site = project.path().join("_site");
    let settings = settings_for(&manifest, &site);
    let store = LocalCacheStore::new(store_root.path());

    fs::create_dir_all(&site).unwrap();
    fs::write(site.join("index.html"), "stale").unwrap();
    let stale_key = format!("{SITE_CACHE_KEY_PREFIX}{}", "0".repeat(64));
    store.save(&[site.clone()], &stale_key).await.unwrap();
    fs::remove_dir_all(&site).unwrap();

    let outcome = cache_site_output(&store, &settings).await.unwrap();
    assert!(!outcome.cache_hit, "prefix match is a partial restore, not a hit");
    assert_eq!(outcome.restored_key, Some(stale_key));
    assert!(site.join("index.html").is_file(), "stale site still restored");
}

#[tokio::test]
async fn changed_sources_change_the_cache_key() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    let settings = settings_for(&manifest, &project.path().join("_site"));
    let store = LocalCacheStore::new(store_root.path());

    let before = cache_site_output(&store, &settings).await.unwrap();
    fs::write(
        project.path().join("documents/section1.adoc"),
        "== Section 1, revised\n",
    )
    .unwrap();
    let after = cache_site_output(&store, &settings).await.unwrap();

    assert_ne!(before.input_hash, after.input_hash);
}

#[tokio::test]
async fn extra_input_widens_the_hashed_set() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = write_project(project.path());
    fs::create_dir_all(project.path().join("assets")).unwrap();
    fs::write(project.path().join("assets/style.css"), "body {}").unwrap();
    let store = LocalCacheStore::new(store_root.path());

    let without = cache_site_output(
        &store,
        &settings_for(&manifest, &project.path().join("_site")),
    )
    .await
    .unwrap();

    let with_extra = CacheSettings::from_inputs(
        &manifest,
        "assets/**",
        project.path().join("_site").to_str().unwrap(),
    )
    .unwrap();
    let with = cache_site_output(&store, &with_extra).await.unwrap();

    assert_ne!(without.input_hash, with.input_hash);
}

#[tokio::test]
async fn manifest_with_nothing_to_hash_skips_the_restore() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = project.path().join("metanorma.yml");
    fs::write(&manifest, "metanorma: {}\n").unwrap();
    let settings = settings_for(
        manifest.to_str().unwrap(),
        &project.path().join("_site"),
    );
    let store = LocalCacheStore::new(store_root.path());

    let outcome = cache_site_output(&store, &settings).await.unwrap();
    assert_eq!(outcome.input_hash, None);
    assert!(!outcome.cache_hit);
}

#[tokio::test]
async fn a_broken_manifest_propagates_as_an_error() {
    let project = tempdir().unwrap();
    let store_root = tempdir().unwrap();
    let manifest = project.path().join("metanorma.yml");
    fs::write(&manifest, "metanorma: [unclosed\n").unwrap();
    let settings = settings_for(
        manifest.to_str().unwrap(),
        &project.path().join("_site"),
    );
    let store = LocalCacheStore::new(store_root.path());

    assert!(cache_site_output(&store, &settings).await.is_err());
}

struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn restore(
        &self,
        _paths: &[PathBuf],
        _primary_key: &str,
        _restore_keys: &[String],
    ) -> anyhow::Result<Option<String>> {
        anyhow::bail!("cache service unavailable")
    }

    async fn save(&self, _paths: &[PathBuf], _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("cache service unavailable")
    }
}

#[tokio::test]
async fn a_failing_restore_degrades_to_a_miss() {
    let project = tempdir().unwrap();
    let manifest = write_project(project.path());
    let settings = settings_for(&manifest, &project.path().join("_site"));

    let outcome = cache_site_output(&FailingCache, &settings).await.unwrap();
    assert!(outcome.input_hash.is_some(), "the hash is still derived");
    assert!(!outcome.cache_hit);
    assert_eq!(outcome.restored_key, None);
}
