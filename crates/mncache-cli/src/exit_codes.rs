//! Unified exit codes for the mncache CLI.
//! These codes are part of the CI contract and stay stable across releases.

pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1; // Run failed or produced nothing to key on
pub const CONFIG_ERROR: i32 = 2; // Input validation or manifest parse failure
