//! Data models and DTOs (Data Transfer Objects) for the slug shortener.
//!
//! Contains the slug record, its identifier type, and API request/response types.
//! Wire names differ from field names in two places: the redirect target
//! travels as `redirect` and the owner as `uid`.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{SLUG_ID_BYTES, SLUG_ID_HEX_LENGTH};
use crate::errors::AppError;

// ============================================================================
// Record Identifier
// ============================================================================

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static ID_COUNTER: OnceLock<AtomicU32> = OnceLock::new();

/// Opaque record identifier: 12 bytes rendered as 24 lowercase hex digits.
///
/// Layout is 4 bytes of big-endian Unix seconds, 5 bytes of per-process
/// randomness and a 3 byte counter, so ids from one process never repeat.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlugId(String);

impl SlugId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        let timestamp = Utc::now().timestamp() as u32;
        let process = PROCESS_UNIQUE.get_or_init(|| rand::thread_rng().gen());
        let counter = ID_COUNTER
            .get_or_init(|| AtomicU32::new(rand::thread_rng().gen()))
            .fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; SLUG_ID_BYTES];
        bytes[..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);

        Self(bytes.iter().map(|b| format!("{:02x}", b)).collect())
    }

    /// Parse an identifier received from a client
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let raw = raw.trim();
        if raw.len() != SLUG_ID_HEX_LENGTH || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::validation(format!(
                "'{}' is not a valid slug id ({} hex characters expected)",
                raw, SLUG_ID_HEX_LENGTH
            )));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SlugId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SlugId> for String {
    fn from(id: SlugId) -> Self {
        id.0
    }
}

// ============================================================================
// Database Models
// ============================================================================

/// A slug record mapping a short token to a redirect target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slug {
    /// Unique identifier, assigned at creation
    pub id: SlugId,
    /// Short token (not required to be unique)
    pub slug: String,
    /// Redirect target
    #[serde(rename = "redirect")]
    pub domain: String,
    /// External id of the owning user
    #[serde(rename = "uid")]
    pub user_id: String,
}

// ============================================================================
// API Request DTOs
// ============================================================================

/// Request body for creating a slug
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSlugRequest {
    pub slug: String,
    #[serde(rename = "redirect")]
    pub domain: String,
    #[serde(rename = "uid")]
    pub user_id: String,
}

/// Request body for updating a slug's token and target
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSlugRequest {
    pub id: SlugId,
    pub slug: String,
    #[serde(rename = "redirect")]
    pub domain: String,
    #[serde(rename = "uid")]
    pub user_id: String,
}

/// Query parameters for listing an owner's slugs
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerQuery {
    #[serde(rename = "userid")]
    pub user_id: String,
}

/// Query parameters for looking up a slug by token
#[derive(Debug, Clone, Deserialize)]
pub struct SlugQuery {
    pub slug: String,
}

/// Query parameters for deleting a slug
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteSlugQuery {
    #[serde(rename = "userid")]
    pub user_id: String,
    /// Raw id; parsed after the owner is verified
    pub id: String,
}

// ============================================================================
// API Response DTOs
// ============================================================================

/// Generic API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code (for programmatic handling)
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
