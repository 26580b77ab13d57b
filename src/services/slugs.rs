//! Slug record store operations: create, list, lookup, update, delete.
//!
//! Update and delete match on `(user_id, id)` and report how many rows they
//! touched; zero is not an error.

use rusqlite::params;

use super::helpers::map_slug_row;
use crate::db::{get_conn, DbPool};
use crate::errors::AppError;
use crate::models::{CreateSlugRequest, Slug, SlugId, UpdateSlugRequest};
use crate::queries::Slugs;

/// Create a new slug record with a freshly generated id
///
/// No duplicate check: two records may carry the same slug token.
pub fn create_slug(pool: &DbPool, request: &CreateSlugRequest) -> Result<Slug, AppError> {
    let conn = get_conn(pool)?;

    let slug = Slug {
        id: SlugId::generate(),
        slug: request.slug.clone(),
        domain: request.domain.clone(),
        user_id: request.user_id.clone(),
    };

    conn.execute(
        Slugs::INSERT,
        params![slug.id.as_str(), slug.slug, slug.domain, slug.user_id],
    )?;

    log::info!(
        "Created slug {}: {} -> {} (user: {})",
        slug.id,
        slug.slug,
        slug.domain,
        slug.user_id
    );

    Ok(slug)
}

/// List every slug owned by `user_id`, in insertion order
pub fn list_slugs_by_owner(pool: &DbPool, user_id: &str) -> Result<Vec<Slug>, AppError> {
    let conn = get_conn(pool)?;

    let mut stmt = conn.prepare(Slugs::SELECT_BY_USER)?;
    let slugs = stmt
        .query_map(params![user_id], map_slug_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(slugs)
}

/// Find the slug record for a token (no ownership check)
///
/// When several records share the token, the most recently created one wins.
pub fn get_slug_by_token(pool: &DbPool, slug: &str) -> Result<Slug, AppError> {
    let conn = get_conn(pool)?;

    let mut stmt = conn.prepare(Slugs::SELECT_BY_SLUG)?;
    let mut matches = stmt
        .query_map(params![slug], map_slug_row)?
        .collect::<Result<Vec<_>, _>>()?;

    if matches.len() > 1 {
        log::debug!("{} records share slug '{}', using the newest", matches.len(), slug);
    }

    matches.pop().ok_or_else(|| AppError::slug_not_found(slug))
}

/// Overwrite the token and target of the record matching `(user_id, id)`
///
/// Returns the number of records changed.
pub fn update_slug(pool: &DbPool, request: &UpdateSlugRequest) -> Result<usize, AppError> {
    let conn = get_conn(pool)?;

    let affected = conn.execute(
        Slugs::UPDATE_BY_ID_AND_USER,
        params![request.slug, request.domain, request.user_id, request.id.as_str()],
    )?;

    if affected == 0 {
        log::warn!(
            "Update matched no slug with ID {} for user {}",
            request.id,
            request.user_id
        );
    } else {
        log::info!("Updated slug {} (user: {})", request.id, request.user_id);
    }

    Ok(affected)
}

/// Delete the record(s) matching `(user_id, id)`
///
/// Returns the number of records removed.
pub fn delete_slug(pool: &DbPool, id: &SlugId, user_id: &str) -> Result<usize, AppError> {
    let conn = get_conn(pool)?;

    let affected = conn.execute(Slugs::DELETE_BY_ID_AND_USER, params![user_id, id.as_str()])?;

    if affected == 0 {
        log::warn!("Delete matched no slug with ID {} for user {}", id, user_id);
    } else {
        log::info!("Deleted slug with ID: {} (user: {})", id, user_id);
    }

    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_slug, find_slug, setup_test_pool};

    #[test]
    fn test_create_assigns_distinct_ids() {
        let pool = setup_test_pool();
        let a = create_test_slug(&pool, "u1", "abc", "http://a.example");
        let b = create_test_slug(&pool, "u1", "abc", "http://b.example");

        assert!(!a.id.as_str().is_empty());
        assert_ne!(a.id, b.id);
        assert_eq!(a.user_id, "u1");
    }

    #[test]
    fn test_list_by_owner() {
        let pool = setup_test_pool();
        let created: Vec<Slug> = (0..3)
            .map(|i| create_test_slug(&pool, "u1", &format!("s{}", i), "http://example.com"))
            .collect();
        create_test_slug(&pool, "u2", "other", "http://other.example");

        let listed = list_slugs_by_owner(&pool, "u1").unwrap();
        assert_eq!(listed, created);
    }

    #[test]
    fn test_list_for_owner_without_slugs_is_empty() {
        let pool = setup_test_pool();
        let listed = list_slugs_by_owner(&pool, "nobody").unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_lookup_by_token() {
        let pool = setup_test_pool();
        let created = create_test_slug(&pool, "u1", "abc", "http://example.com");

        let found = get_slug_by_token(&pool, "abc").unwrap();
        assert_eq!(found, created);
    }

    #[test]
    fn test_lookup_missing_token() {
        let pool = setup_test_pool();
        let result = get_slug_by_token(&pool, "never-created");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_lookup_with_shared_token_returns_newest() {
        let pool = setup_test_pool();
        create_test_slug(&pool, "u1", "dup", "http://first.example");
        let newest = create_test_slug(&pool, "u2", "dup", "http://second.example");

        let found = get_slug_by_token(&pool, "dup").unwrap();
        assert_eq!(found, newest);
    }

    #[test]
    fn test_update_changes_only_slug_and_domain() {
        let pool = setup_test_pool();
        let target = create_test_slug(&pool, "u1", "old", "http://old.example");
        let bystander = create_test_slug(&pool, "u1", "keep", "http://keep.example");

        let request = UpdateSlugRequest {
            id: target.id.clone(),
            slug: "new".into(),
            domain: "http://new.example".into(),
            user_id: "u1".into(),
        };
        assert_eq!(update_slug(&pool, &request).unwrap(), 1);

        let updated = find_slug(&pool, &target.id).unwrap();
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.user_id, "u1");
        assert_eq!(updated.slug, "new");
        assert_eq!(updated.domain, "http://new.example");

        assert_eq!(find_slug(&pool, &bystander.id), Some(bystander));
    }

    #[test]
    fn test_update_by_other_owner_is_a_noop() {
        let pool = setup_test_pool();
        let target = create_test_slug(&pool, "u1", "mine", "http://mine.example");

        let request = UpdateSlugRequest {
            id: target.id.clone(),
            slug: "stolen".into(),
            domain: "http://evil.example".into(),
            user_id: "u2".into(),
        };
        assert_eq!(update_slug(&pool, &request).unwrap(), 0);
        assert_eq!(find_slug(&pool, &target.id), Some(target));
    }

    #[test]
    fn test_delete_removes_only_the_match() {
        let pool = setup_test_pool();
        let doomed = create_test_slug(&pool, "u1", "bye", "http://bye.example");
        let survivor = create_test_slug(&pool, "u1", "stay", "http://stay.example");

        assert_eq!(delete_slug(&pool, &doomed.id, "u1").unwrap(), 1);

        assert!(find_slug(&pool, &doomed.id).is_none());
        assert_eq!(list_slugs_by_owner(&pool, "u1").unwrap(), vec![survivor]);
    }

    #[test]
    fn test_delete_requires_matching_owner() {
        let pool = setup_test_pool();
        let slug = create_test_slug(&pool, "u1", "mine", "http://mine.example");

        assert_eq!(delete_slug(&pool, &slug.id, "u2").unwrap(), 0);
        assert!(find_slug(&pool, &slug.id).is_some());
    }

    #[test]
    fn test_delete_missing_pair_succeeds() {
        let pool = setup_test_pool();
        let id = SlugId::generate();
        assert_eq!(delete_slug(&pool, &id, "u1").unwrap(), 0);
    }
}
