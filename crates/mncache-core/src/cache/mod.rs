//! Cache restore orchestration.
//!
//! The cache-service boundary, the static asset group registry, the bundled
//! archive store, and the two coordinators (system assets, site output).

pub mod groups;
pub mod service;
pub mod site;
pub mod store;
pub mod system;

pub use groups::{CacheGroup, SITE_CACHE_KEY_PREFIX, SYSTEM_CACHE_GROUPS};
pub use service::CacheService;
pub use site::{cache_site_output, SiteCacheOutcome};
pub use store::LocalCacheStore;
pub use system::{
    restore_asset_groups, restore_system_assets, save_asset_groups, save_system_assets,
};
