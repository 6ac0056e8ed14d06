//! Centralized constants for the Infisical loader workspace.
//!
//! Default values live here so the config builder, the env loader and the
//! CLI agree on them.

// =============================================================================
// Service Defaults
// =============================================================================

/// Production Infisical endpoint used when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://app.infisical.com";

/// Secret path that scopes a fetch to the root of an environment.
pub const DEFAULT_SECRET_PATH: &str = "/";

/// Suffix stripped from caller-supplied base URLs; endpoint paths add it back.
pub const API_PATH_SUFFIX: &str = "/api";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

// =============================================================================
// Output Defaults
// =============================================================================

/// Separator used in raw secret keys to express nesting.
pub const RAW_KEY_SEPARATOR: &str = "__";

/// Separator used by host configuration trees for nested keys.
pub const OUTPUT_KEY_SEPARATOR: &str = ":";
