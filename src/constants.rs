//! Application-wide constants.
//!
//! Centralizes magic numbers and strings for better maintainability.

// ============================================================================
// Store Constants
// ============================================================================

/// Time budget for a single store operation, in seconds
pub const DEFAULT_STORE_OP_TIMEOUT_SECS: u64 = 30;

/// Time budget for establishing the store connection at startup, in seconds
pub const DEFAULT_STORE_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default maximum number of pooled store connections
pub const DEFAULT_DB_POOL_SIZE: u32 = 10;

// ============================================================================
// Record Identifier Constants
// ============================================================================

/// Number of raw bytes in a record identifier
pub const SLUG_ID_BYTES: usize = 12;

/// Length of a record identifier rendered as hex
pub const SLUG_ID_HEX_LENGTH: usize = SLUG_ID_BYTES * 2;

// ============================================================================
// Identity Provider Constants
// ============================================================================

/// Identity Toolkit REST endpoint used for account lookups
pub const IDENTITY_TOOLKIT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

/// Default OAuth2 token endpoint for service account assertions
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Grant type for the signed JWT assertion exchange
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// OAuth2 scopes requested for account lookups
pub const IDENTITY_SCOPES: &str = concat!(
    "https://www.googleapis.com/auth/cloud-platform ",
    "https://www.googleapis.com/auth/identitytoolkit"
);

/// Lifetime requested for a signed assertion, in seconds
pub const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Bearer token accepted by the Firebase Auth emulator
pub const EMULATOR_BEARER_TOKEN: &str = "owner";

/// Error message prefix the identity provider uses for unknown accounts
pub const USER_NOT_FOUND_MESSAGE: &str = "USER_NOT_FOUND";

/// Default timeout for identity provider requests, in seconds
pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;

/// Default lifetime of a cached access token, in seconds
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 3000;

// ============================================================================
// Server Constants
// ============================================================================

/// Grace period for in-flight requests on shutdown, in seconds
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Test Constants
// ============================================================================

/// Prefix for per-test in-memory SQLite databases
#[cfg(test)]
pub const TEST_DB_PREFIX: &str = "file:slug_test_";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_id_length() {
        assert_eq!(SLUG_ID_HEX_LENGTH, 24);
    }

    #[test]
    fn test_access_token_ttl_below_token_lifetime() {
        // Cached tokens must expire before the provider's one hour lifetime
        assert!(DEFAULT_ACCESS_TOKEN_TTL_SECS < ASSERTION_LIFETIME_SECS as u64);
    }

    #[test]
    fn test_connect_timeout_shorter_than_op_timeout() {
        assert!(DEFAULT_STORE_CONNECT_TIMEOUT_SECS <= DEFAULT_STORE_OP_TIMEOUT_SECS);
    }
}
