use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mncache",
    version,
    about = "Restore Metanorma build caches in CI — system assets plus the rendered site, keyed by a content hash of the build inputs"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Restore system asset caches and, when a manifest is given, the site cache
    Restore(RestoreArgs),
    /// Compute and print the input hash for a manifest without touching any cache
    Hash(HashArgs),
    Version,
}

#[derive(clap::Args, Debug)]
pub struct RestoreArgs {
    /// Path to the metanorma.yml manifest; empty restores system assets only
    #[arg(long, env = "INPUT_CACHE_SITE_FOR_MANIFEST", default_value = "")]
    pub cache_site_for_manifest: String,

    /// Extra directories that affect the build (comma or newline separated,
    /// relative to the manifest directory)
    #[arg(long, env = "INPUT_EXTRA_INPUT", default_value = "")]
    pub extra_input: String,

    /// Rendered site output directory (default: _site)
    #[arg(long, env = "INPUT_CACHE_SITE_PATH", default_value = "")]
    pub cache_site_path: String,

    /// Cache store directory (default: the platform cache dir + /mncache)
    #[arg(long, env = "MNCACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Also save each existing asset group back to the store after restoring,
    /// for runners without an end-of-job cache step
    #[arg(long, env = "INPUT_SAVE_SYSTEM_CACHES")]
    pub save_system_caches: bool,
}

#[derive(clap::Args, Debug)]
pub struct HashArgs {
    /// Path to the metanorma.yml manifest
    #[arg(long, env = "INPUT_CACHE_SITE_FOR_MANIFEST")]
    pub cache_site_for_manifest: String,

    /// Extra directories that affect the build (comma or newline separated)
    #[arg(long, env = "INPUT_EXTRA_INPUT", default_value = "")]
    pub extra_input: String,
}
