//! Named outputs for the CI runner.
//!
//! Appends `name=value` lines to the file named by `GITHUB_OUTPUT` when the
//! runner provides one, otherwise prints them to stdout so local runs and
//! other runners can scrape them.

use std::fs::OpenOptions;
use std::io::Write;

/// Site cache hit flag ("true"/"false").
pub const CACHE_SITE_CACHE_HIT: &str = "cache-site-cache-hit";
/// Computed input digest.
pub const HASH: &str = "hash";

pub fn set_output(name: &str, value: &str) -> anyhow::Result<()> {
    match std::env::var("GITHUB_OUTPUT") {
        Ok(path) if !path.is_empty() => {
            let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
            writeln!(file, "{name}={value}")?;
        }
        _ => println!("{name}={value}"),
    }
    Ok(())
}
