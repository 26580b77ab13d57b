//! Test utilities and helpers.
//!
//! Provides common test infrastructure used across multiple test modules.
//! This module is only compiled when running tests.

#![cfg(test)]

use async_trait::async_trait;
use rand::Rng;
use rusqlite::{params, OptionalExtension};

use crate::config::Config;
use crate::constants::TEST_DB_PREFIX;
use crate::db::{init_pool, run_migrations, DbPool};
use crate::errors::AppError;
use crate::identity::{IdentityVerifier, StaticVerifier};
use crate::models::{CreateSlugRequest, Slug, SlugId};
use crate::queries::Slugs;
use crate::services::helpers::map_slug_row;

/// Create an in-memory database pool for testing.
///
/// Every call gets its own named shared-cache database, so tests running in
/// parallel never see each other's records.
pub fn setup_test_pool() -> DbPool {
    let config = test_config();
    let name: u64 = rand::thread_rng().gen();
    let url = format!("{}{:016x}?mode=memory&cache=shared", TEST_DB_PREFIX, name);

    let pool = init_pool(
        &url,
        2,
        config.store_connect_timeout(),
        config.store_op_timeout(),
    )
    .expect("Failed to create test pool");
    run_migrations(&pool).expect("Failed to run migrations");
    pool
}

/// Create a default test configuration.
pub fn test_config() -> Config {
    Config::default()
}

/// Verifier that knows users `u1` and `u2`.
pub fn test_verifier() -> StaticVerifier {
    StaticVerifier::new(["u1", "u2"])
}

/// Verifier whose provider is always down.
pub struct FailingVerifier;

#[async_trait]
impl IdentityVerifier for FailingVerifier {
    async fn exists(&self, _user_id: &str) -> Result<bool, AppError> {
        Err(AppError::identity("identity provider unavailable"))
    }
}

/// Helper to create a slug record directly in the store.
pub fn create_test_slug(pool: &DbPool, user_id: &str, slug: &str, domain: &str) -> Slug {
    let request = CreateSlugRequest {
        slug: slug.to_string(),
        domain: domain.to_string(),
        user_id: user_id.to_string(),
    };
    crate::services::create_slug(pool, &request).expect("Failed to create test slug")
}

/// Read a record straight from the store, bypassing ownership filters.
pub fn find_slug(pool: &DbPool, id: &SlugId) -> Option<Slug> {
    let conn = pool.get().expect("Failed to get connection");
    conn.query_row(Slugs::SELECT_BY_ID, params![id.as_str()], map_slug_row)
        .optional()
        .expect("Failed to query slug")
}

/// Count every record in the store.
pub fn count_slugs(pool: &DbPool) -> i64 {
    let conn = pool.get().expect("Failed to get connection");
    conn.query_row("SELECT COUNT(*) FROM slugs", [], |row| row.get(0))
        .expect("Failed to count slugs")
}
