use crate::config::BookshelfConfig;
use crate::db::connect_pool;
use sqlx::SqlitePool;
use std::time::Duration;

mod api_catalog_concurrency;

pub fn test_config(database_url: &str, max_connections: u32) -> BookshelfConfig {
    BookshelfConfig {
        database_url: database_url.to_string(),
        max_connections,
        acquire_timeout: Duration::from_secs(5),
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: "info".into(),
    }
}

// fresh in-memory database with the real schema applied
pub async fn setup_test_pool() -> SqlitePool {
    connect_pool(&test_config("sqlite::memory:", 1))
        .await
        .expect("Failed to create in-memory database")
}
