//! Slug endpoint handlers: list, lookup, create, update, delete.

use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::auth::require_known_user;
use crate::config::Config;
use crate::db::{run_with_timeout, DbPool};
use crate::errors::AppError;
use crate::identity::IdentityVerifier;
use crate::metrics::AppMetrics;
use crate::models::{
    CreateSlugRequest, DeleteSlugQuery, OwnerQuery, SlugId, SlugQuery, UpdateSlugRequest,
};
use crate::services;

/// Run a store operation within the configured budget, counting timeouts
async fn run_store<T, F>(
    pool: &DbPool,
    config: &Config,
    metrics: Option<&AppMetrics>,
    op: F,
) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let result = run_with_timeout(pool, config.store_op_timeout(), op).await;
    if let (Err(AppError::StoreTimeout(_)), Some(m)) = (&result, metrics) {
        m.record_store_timeout();
    }
    result
}

/// List all slugs owned by a user
#[get("/slugs")]
pub(super) async fn list_slugs(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    verifier: web::Data<dyn IdentityVerifier>,
    metrics: Option<web::Data<AppMetrics>>,
    query: web::Query<OwnerQuery>,
) -> Result<HttpResponse, AppError> {
    let metrics = metrics.as_ref().map(|m| m.get_ref());
    let user_id = query.into_inner().user_id;

    require_known_user(verifier.get_ref(), &user_id, metrics).await?;

    let slugs = run_store(&pool, &config, metrics, move |pool| {
        services::list_slugs_by_owner(pool, &user_id)
    })
    .await?;

    Ok(HttpResponse::Ok().json(slugs))
}

/// Look up a slug by its token
///
/// Public: the redirect front end resolves tokens without a signed-in user.
#[get("/slug")]
pub(super) async fn get_slug(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    metrics: Option<web::Data<AppMetrics>>,
    query: web::Query<SlugQuery>,
) -> Result<HttpResponse, AppError> {
    let metrics = metrics.as_ref().map(|m| m.get_ref());
    let token = query.into_inner().slug;

    let result = run_store(&pool, &config, metrics, move |pool| {
        services::get_slug_by_token(pool, &token)
    })
    .await;

    if let Some(m) = metrics {
        match &result {
            Ok(_) => m.record_lookup(true),
            Err(AppError::NotFound(_)) => m.record_lookup(false),
            Err(_) => {}
        }
    }

    Ok(HttpResponse::Ok().json(result?))
}

/// Create a slug for a verified owner
#[post("/slugs")]
pub(super) async fn create_slug(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    verifier: web::Data<dyn IdentityVerifier>,
    metrics: Option<web::Data<AppMetrics>>,
    body: web::Json<CreateSlugRequest>,
) -> Result<HttpResponse, AppError> {
    let metrics = metrics.as_ref().map(|m| m.get_ref());
    let request = body.into_inner();

    require_known_user(verifier.get_ref(), &request.user_id, metrics).await?;

    let slug = run_store(&pool, &config, metrics, move |pool| {
        services::create_slug(pool, &request)
    })
    .await?;

    if let Some(m) = metrics {
        m.record_slug_created();
    }

    Ok(HttpResponse::Ok().json(slug))
}

/// Replace the token and target of an owned slug
#[put("/slugs")]
pub(super) async fn update_slug(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    verifier: web::Data<dyn IdentityVerifier>,
    metrics: Option<web::Data<AppMetrics>>,
    body: web::Json<UpdateSlugRequest>,
) -> Result<HttpResponse, AppError> {
    let metrics = metrics.as_ref().map(|m| m.get_ref());
    let request = body.into_inner();

    require_known_user(verifier.get_ref(), &request.user_id, metrics).await?;

    run_store(&pool, &config, metrics, move |pool| {
        services::update_slug(pool, &request)
    })
    .await?;

    Ok(HttpResponse::Ok().finish())
}

/// Delete an owned slug
#[delete("/slugs")]
pub(super) async fn delete_slug(
    pool: web::Data<DbPool>,
    config: web::Data<Config>,
    verifier: web::Data<dyn IdentityVerifier>,
    metrics: Option<web::Data<AppMetrics>>,
    query: web::Query<DeleteSlugQuery>,
) -> Result<HttpResponse, AppError> {
    let metrics = metrics.as_ref().map(|m| m.get_ref());
    let query = query.into_inner();

    require_known_user(verifier.get_ref(), &query.user_id, metrics).await?;

    let id = SlugId::parse(&query.id)?;
    let user_id = query.user_id;

    run_store(&pool, &config, metrics, move |pool| {
        services::delete_slug(pool, &id, &user_id)
    })
    .await?;

    Ok(HttpResponse::Ok().finish())
}
