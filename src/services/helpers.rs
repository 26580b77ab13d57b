//! Shared utilities used by the slug services.

use crate::models::{Slug, SlugId};

/// Map a database row to a Slug struct
pub(crate) fn map_slug_row(row: &rusqlite::Row) -> rusqlite::Result<Slug> {
    let raw_id: String = row.get(0)?;
    let id = SlugId::parse(&raw_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Slug {
        id,
        slug: row.get(1)?,
        domain: row.get(2)?,
        user_id: row.get(3)?,
    })
}
