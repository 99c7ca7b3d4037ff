//! Ambient-environment access for home-directory expansion.

/// Read-only access to process environment variables.
///
/// Coordinators take this as an injected capability instead of reading
/// `std::env` directly, so tests can supply a fixed environment without
/// mutating process state.
pub trait EnvProvider {
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvProvider`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl EnvProvider for SystemEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Expand a leading `~` using `HOME`, falling back to `USERPROFILE`.
///
/// With neither variable set the shorthand expands to the empty string,
/// leaving a root-relative path.
pub fn expand_tilde(path: &str, env: &dyn EnvProvider) -> String {
    match path.strip_prefix('~') {
        Some(rest) => {
            let home = env
                .var("HOME")
                .or_else(|| env.var("USERPROFILE"))
                .unwrap_or_default();
            format!("{home}{rest}")
        }
        None => path.to_string(),
    }
}
