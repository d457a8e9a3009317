//! Logging setup
//!
//! The crate logs through the `log` facade. Applications that do not install
//! their own logger can call [`init`] or [`init_with_level`] to get
//! `env_logger` output filtered by `RUST_LOG`.

pub use log::{debug, error, info, trace, warn};

/// Initialize `env_logger` from `RUST_LOG`
///
/// Does nothing if a logger is already installed.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize `env_logger`, falling back to `level` when `RUST_LOG` is unset
///
/// Returns `false` if a logger was already installed.
pub fn init_with_level(level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_repeatable() {
        init();
        init();
        assert!(!init_with_level("debug"));
    }
}
