use crate::config::BookshelfConfig;
use crate::error::ApiError;
use anyhow::{Context, Result};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use sqlx::migrate::{MigrateDatabase, Migrator};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqlitePool};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;
use tracing::info;

// schema for the author and book tables, embedded at compile time
pub static SCHEMA: Migrator = sqlx::migrate!("./migrations");

/// Creates the database if needed, opens the pool and applies the schema.
pub async fn connect_pool(config: &BookshelfConfig) -> Result<SqlitePool> {
    if !Sqlite::database_exists(&config.database_url)
        .await
        .unwrap_or(false)
    {
        info!(url = %config.database_url, "database not found, creating");
        Sqlite::create_database(&config.database_url)
            .await
            .with_context(|| format!("Unable to create database at {}", config.database_url))?;
    }

    // book.author_id is a plain column as far as writes are concerned
    let connect_options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("Invalid DATABASE_URL {}", config.database_url))?
        .foreign_keys(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(connect_options)
        .await
        .with_context(|| format!("Failed to create pool on {}", config.database_url))?;

    SCHEMA
        .run(&pool)
        .await
        .context("Failed to apply database schema")?;

    info!(
        url = %config.database_url,
        max_connections = config.max_connections,
        "database ready"
    );

    Ok(pool)
}

/// A pooled connection scoped to a single request.
///
/// Handed back to the pool when the value is dropped, whether the handler
/// succeeded, failed or was cancelled. As an extractor it must come after the
/// path and query extractors; handlers that read a body call
/// [`DbConnection::acquire`] once the body is parsed.
pub struct DbConnection(pub PoolConnection<Sqlite>);

impl DbConnection {
    pub async fn acquire(pool: &SqlitePool) -> Result<Self, ApiError> {
        let conn = pool.acquire().await?;
        Ok(Self(conn))
    }
}

impl<S> FromRequestParts<S> for DbConnection
where
    SqlitePool: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let pool = SqlitePool::from_ref(state);
        Self::acquire(&pool).await
    }
}

impl Deref for DbConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
