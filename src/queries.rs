//! SQL query constants for the slug shortener.
//!
//! Centralizes all SQL queries for better maintainability and consistency.

/// Schema-related queries for database setup and migrations.
pub struct Schema;

impl Schema {
    pub const CREATE_SLUGS_TABLE: &'static str = "
        CREATE TABLE IF NOT EXISTS slugs (
            id          TEXT PRIMARY KEY,
            slug        TEXT NOT NULL,
            domain      TEXT NOT NULL,
            user_id     TEXT NOT NULL
        )";

    pub const CREATE_SLUG_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS idx_slugs_slug ON slugs (slug)";

    pub const CREATE_USER_ID_INDEX: &'static str =
        "CREATE INDEX IF NOT EXISTS idx_slugs_user_id ON slugs (user_id)";

    #[cfg(test)]
    pub const TABLE_EXISTS: &'static str =
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1";

    pub const PING: &'static str = "SELECT 1";
}

/// Slug record queries.
///
/// Result sets are ordered by rowid so callers see records in insertion order.
pub struct Slugs;

impl Slugs {
    pub const INSERT: &'static str =
        "INSERT INTO slugs (id, slug, domain, user_id) VALUES (?1, ?2, ?3, ?4)";

    pub const SELECT_BY_USER: &'static str =
        "SELECT id, slug, domain, user_id FROM slugs WHERE user_id = ?1 ORDER BY rowid ASC";

    pub const SELECT_BY_SLUG: &'static str =
        "SELECT id, slug, domain, user_id FROM slugs WHERE slug = ?1 ORDER BY rowid ASC";

    #[cfg(test)]
    pub const SELECT_BY_ID: &'static str =
        "SELECT id, slug, domain, user_id FROM slugs WHERE id = ?1";

    pub const UPDATE_BY_ID_AND_USER: &'static str =
        "UPDATE slugs SET slug = ?1, domain = ?2 WHERE user_id = ?3 AND id = ?4";

    pub const DELETE_BY_ID_AND_USER: &'static str =
        "DELETE FROM slugs WHERE user_id = ?1 AND id = ?2";
}
