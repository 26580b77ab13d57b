//! # Slug Shortener
//!
//! A small backend for owner-scoped short links, built with Rust, Actix-web,
//! and SQLite.
//!
//! ## Features
//! - Create, list, update and delete slugs for a verified user
//! - Public lookup of a slug by its token
//! - Identity verification against Firebase Authentication
//! - Per-operation store timeouts
//! - Prometheus metrics

mod auth;
mod cache;
mod config;
mod constants;
mod db;
mod errors;
mod handlers;
mod identity;
mod metrics;
mod models;
mod queries;
mod services;
mod test_utils;

use std::io;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info};
use prometheus::Registry;

use crate::errors::AppError;

/// Log a startup failure and turn it into the process exit error
fn fatal(stage: &str, err: AppError) -> io::Error {
    error!("{}: {}", stage, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", stage, err))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables from .env file
    dotenv::dotenv().ok();

    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = config::Config::from_env().map_err(|e| fatal("Invalid configuration", e))?;

    // Connect to the store once; failure here is fatal
    let pool = db::init_pool(
        &config.database_url,
        config.db_pool_size,
        config.store_connect_timeout(),
        config.store_op_timeout(),
    )
    .map_err(|e| fatal("Failed to create database pool", e))?;

    db::ping(&pool).map_err(|e| fatal("Store liveness check failed", e))?;
    db::run_migrations(&pool).map_err(|e| fatal("Failed to run database migrations", e))?;

    let verifier = web::Data::from(
        identity::build_verifier(&config)
            .map_err(|e| fatal("Failed to initialize identity verification", e))?,
    );

    let registry = Registry::new();
    let app_metrics = metrics::AppMetrics::new(&registry)
        .map_err(|e| fatal("Failed to register metrics", AppError::internal(e.to_string())))?;
    let metrics_data = config
        .metrics_enabled
        .then(|| (web::Data::new(app_metrics), web::Data::new(registry)));

    info!("Starting slug shortener at http://{}", config.bind_addr());
    info!("API:");
    info!("   GET    /slugs?userid=<uid>          - List a user's slugs");
    info!("   GET    /slug?slug=<token>           - Look up a slug");
    info!("   POST   /slugs                       - Create a slug");
    info!("   PUT    /slugs                       - Update a slug");
    info!("   DELETE /slugs?userid=<uid>&id=<id>  - Delete a slug");
    info!(
        "Store timeouts: connect={}s, operation={}s",
        config.store_connect_timeout_secs, config.store_op_timeout_secs
    );

    let bind_addr = config.bind_addr();
    let shutdown_timeout = config.shutdown_timeout_secs;
    let pool = web::Data::new(pool);
    let config = web::Data::new(config);

    HttpServer::new(move || {
        let mut app = App::new()
            .app_data(pool.clone())
            .app_data(config.clone())
            .app_data(verifier.clone());

        if let Some((app_metrics, registry)) = &metrics_data {
            app = app.app_data(app_metrics.clone()).app_data(registry.clone());
        }

        app.wrap(Logger::default())
            .configure(handlers::configure_routes)
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(&bind_addr)?
    .run()
    .await
}
