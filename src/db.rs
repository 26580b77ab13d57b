//! Database module for SQLite connection, migrations, and bounded execution.
//!
//! Uses r2d2 connection pool for connection management. Store calls are
//! blocking, so handlers run them on the blocking thread pool through
//! [`run_with_timeout`], which fails the request once the time budget is spent.

use std::time::Duration;

use actix_web::web;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;

use crate::errors::AppError;
use crate::queries::Schema;

/// Type alias for the SQLite connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled database connection
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Initialize the database connection pool
///
/// # Arguments
/// * `database_url` - Path (or SQLite URI) of the database
/// * `max_size` - Maximum number of pooled connections
/// * `connect_timeout` - How long to wait for connections to be established
/// * `busy_timeout` - How long a statement waits on a locked database
///
/// # Returns
/// * `Result<DbPool, AppError>` - The connection pool or an error
pub fn init_pool(
    database_url: &str,
    max_size: u32,
    connect_timeout: Duration,
    busy_timeout: Duration,
) -> Result<DbPool, AppError> {
    if max_size == 0 || connect_timeout.is_zero() {
        return Err(AppError::config(
            "Pool size and connect timeout must be greater than zero",
        ));
    }

    let manager = SqliteConnectionManager::file(database_url)
        .with_init(move |conn| conn.busy_timeout(busy_timeout));

    let pool = Pool::builder()
        .max_size(max_size)
        .connection_timeout(connect_timeout)
        .build(manager)
        .map_err(|e| AppError::DatabaseError(format!("Failed to create pool: {}", e)))?;

    Ok(pool)
}

/// Run database migrations to create necessary tables
///
/// # Arguments
/// * `pool` - Reference to the database connection pool
///
/// # Returns
/// * `Result<(), AppError>` - Success or an error
pub fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_conn(pool)?;

    conn.execute(Schema::CREATE_SLUGS_TABLE, [])
        .map_err(|e| AppError::DatabaseError(format!("Failed to create slugs table: {}", e)))?;

    conn.execute(Schema::CREATE_SLUG_INDEX, [])
        .map_err(|e| AppError::DatabaseError(format!("Failed to create slug index: {}", e)))?;

    conn.execute(Schema::CREATE_USER_ID_INDEX, [])
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user index: {}", e)))?;

    log::info!("Database migrations completed successfully");
    Ok(())
}

/// Check that the store answers a trivial query
pub fn ping(pool: &DbPool) -> Result<(), AppError> {
    let conn = get_conn(pool)?;
    let one: i64 = conn
        .query_row(Schema::PING, [], |row| row.get(0))
        .map_err(|e| AppError::DatabaseError(format!("Liveness check failed: {}", e)))?;

    if one != 1 {
        return Err(AppError::DatabaseError(
            "Liveness check returned an unexpected value".into(),
        ));
    }
    Ok(())
}

/// Get a connection from the pool
pub fn get_conn(pool: &DbPool) -> Result<DbConnection, AppError> {
    pool.get()
        .map_err(|e| AppError::DatabaseError(format!("Failed to get connection: {}", e)))
}

/// Run a blocking store operation on the blocking pool, bounded by `timeout`
///
/// Exceeding the budget fails with [`AppError::StoreTimeout`]. The request
/// stops waiting at that point; SQLite's busy timeout bounds the worker side.
pub async fn run_with_timeout<T, F>(pool: &DbPool, timeout: Duration, op: F) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    let pool = pool.clone();
    let task = web::block(move || op(&pool));

    match actix_web::rt::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => Err(AppError::internal(format!("Store task failed: {}", e))),
        Err(_) => {
            log::error!("Store operation exceeded {:?}", timeout);
            Err(AppError::store_timeout(timeout))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_pool;

    #[test]
    fn test_init_pool_and_migrations() {
        let pool = setup_test_pool();
        let conn = pool.get().expect("Should get connection");

        let count: i32 = conn
            .query_row(Schema::TABLE_EXISTS, ["slugs"], |row| row.get(0))
            .expect("Should query");

        assert_eq!(count, 1);
    }

    #[test]
    fn test_init_pool_rejects_zero_settings() {
        let url = "file:slug_zero_pool?mode=memory&cache=shared";
        let second = Duration::from_secs(1);

        let result = init_pool(url, 0, second, second);
        assert!(matches!(result, Err(AppError::ConfigError(_))));

        let result = init_pool(url, 1, Duration::ZERO, second);
        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let pool = setup_test_pool();
        run_migrations(&pool).expect("Second run should succeed");
    }

    #[test]
    fn test_ping() {
        let pool = setup_test_pool();
        assert!(ping(&pool).is_ok());
    }

    #[actix_rt::test]
    async fn test_run_with_timeout_returns_result() {
        let pool = setup_test_pool();
        let value = run_with_timeout(&pool, Duration::from_secs(5), |pool| {
            ping(pool)?;
            Ok(7)
        })
        .await
        .unwrap();
        assert_eq!(value, 7);
    }

    #[actix_rt::test]
    async fn test_run_with_timeout_propagates_errors() {
        let pool = setup_test_pool();
        let result: Result<(), AppError> =
            run_with_timeout(&pool, Duration::from_secs(5), |_| {
                Err(AppError::DatabaseError("boom".into()))
            })
            .await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[actix_rt::test]
    async fn test_run_with_timeout_expires() {
        let pool = setup_test_pool();
        let result = run_with_timeout(&pool, Duration::from_millis(50), |_| {
            std::thread::sleep(Duration::from_millis(300));
            Ok(())
        })
        .await;
        assert!(matches!(result, Err(AppError::StoreTimeout(_))));
    }
}
