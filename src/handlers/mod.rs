//! HTTP request handlers for the slug API.
//!
//! Defines all route handlers and configures the routing table.

mod health;
mod slugs;

use actix_web::web;

use crate::errors::AppError;

/// Configure all application routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(
        web::QueryConfig::default().error_handler(|err, _req| {
            AppError::validation(format!("Invalid query parameters: {}", err)).into()
        }),
    )
    .service(slugs::list_slugs)
    .service(slugs::create_slug)
    .service(slugs::update_slug)
    .service(slugs::delete_slug)
    .service(slugs::get_slug)
    .service(health::health_check)
    .service(health::metrics_endpoint);
}
