pub mod authors;
pub mod books;

use crate::AppState;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use std::num::NonZeroU32;
use tower_http::trace::TraceLayer;

pub const DEFAULT_PAGE_LIMIT: NonZeroU32 = match NonZeroU32::new(10) {
    Some(limit) => limit,
    None => panic!("default page limit must be non-zero"),
};

/// Offset windowing for list endpoints: drop `skip` rows, return at most `limit`.
///
/// A negative `skip` or a `limit` of zero fails deserialization, so the
/// `Query` extractor rejects the request before any handler runs.
#[derive(Deserialize, Debug)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: NonZeroU32,
}

pub(crate) fn default_limit() -> NonZeroU32 {
    DEFAULT_PAGE_LIMIT
}

/// SQLite binds integers as i64; offsets past that skip every row anyway.
pub fn clamp_offset(skip: u64) -> i64 {
    i64::try_from(skip).unwrap_or(i64::MAX)
}

// where features are composed
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(read_root))
        .merge(authors::authors_router())
        .merge(books::books_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn read_root() -> Json<Value> {
    Json(json!({ "message": "Server is up!" }))
}
