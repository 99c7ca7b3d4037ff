//! Static registry of system asset cache groups.
//!
//! Each group is restored independently so one failure never cascades into
//! the others. Adding a group is adding a row.

/// One independently restored category of system-level cached assets.
#[derive(Debug, Clone, Copy)]
pub struct CacheGroup {
    /// Group name used in logs.
    pub name: &'static str,
    /// Fixed cache key for the group.
    pub key: &'static str,
    /// Candidate paths, filtered for existence after tilde expansion.
    pub paths: &'static [&'static str],
}

/// Key prefix for the rendered-site cache; the input hash is appended.
pub const SITE_CACHE_KEY_PREFIX: &str = "metanorma-site-cache-";

/// System asset groups for Metanorma builds.
pub const SYSTEM_CACHE_GROUPS: &[CacheGroup] = &[
    CacheGroup {
        name: "metanorma",
        key: "metanorma-home",
        paths: &["~/.metanorma", "/root/.metanorma"],
    },
    CacheGroup {
        name: "relaton",
        key: "metanorma-relaton",
        paths: &["~/.relaton", "/root/.relaton"],
    },
    CacheGroup {
        name: "fontist",
        key: "metanorma-fontist",
        paths: &["~/.fontist", "/config/fonts", "/root/.fontist"],
    },
    CacheGroup {
        name: "ietf-workgroup",
        key: "metanorma-ietf-workgroup-cache",
        paths: &[
            "~/.metanorma-ietf-workgroup-cache.json",
            "/root/.metanorma-ietf-workgroup-cache.json",
        ],
    },
];
