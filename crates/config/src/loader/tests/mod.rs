//! Tests for the configuration loader.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.

use std::sync::Mutex;


/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Every variable the loader reads, unset, so a test starts from a clean slate.
pub fn cleared_vars() -> Vec<(&'static str, Option<&'static str>)> {
    use crate::loader::env::*;
    vec![
        (ENV_ENVIRONMENT, None),
        (ENV_PROJECT_ID, None),
        (ENV_SECRET_PATH, None),
        (ENV_URL, None),
        (ENV_PREFIX, None),
        (ENV_CLIENT_ID, None),
        (ENV_CLIENT_SECRET, None),
        (ENV_IDENTITY_ID, None),
        (ENV_IDENTITY_TOKEN_FILE, None),
        (ENV_AZURE_FEDERATED_TOKEN_FILE, None),
        (ENV_TIMEOUT, None),
        (ENV_SKIP_VERIFY, None),
    ]
}

/// `cleared_vars()` with the given overrides applied.
pub fn with_vars(
    overrides: &[(&'static str, &'static str)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut vars = cleared_vars();
    for &(key, value) in overrides {
        match vars.iter_mut().find(|slot| slot.0 == key) {
            Some(slot) => slot.1 = Some(value),
            None => vars.push((key, Some(value))),
        }
    }
    vars
}
