//! Health check and metrics endpoint handlers.

use actix_web::{get, web, HttpResponse};
use prometheus::{Encoder, Registry, TextEncoder};

/// Health check endpoint
#[get("/health")]
pub(super) async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Prometheus text exposition; 404 when metrics are disabled
#[get("/metrics")]
pub(super) async fn metrics_endpoint(registry: Option<web::Data<Registry>>) -> HttpResponse {
    let Some(registry) = registry else {
        return HttpResponse::NotFound().finish();
    };

    let encoder = TextEncoder::new();
    match encoder.encode_to_string(&registry.gather()) {
        Ok(body) => HttpResponse::Ok()
            .content_type(encoder.format_type())
            .body(body),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
