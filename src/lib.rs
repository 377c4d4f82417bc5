use axum::extract::FromRef;
use sqlx::SqlitePool;

pub mod config;
pub mod db;
pub mod error;
pub mod features;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

// lets the per-request connection extractor reach the pool
impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
