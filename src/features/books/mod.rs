pub mod model;
pub mod repo;

use crate::AppState;
use crate::db::DbConnection;
use crate::error::ApiResult;
use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use model::{BookCreate, JsonBook};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::num::NonZeroU32;
use tracing::info;

/// Query string for `GET /books/`: an optional author filter plus the same
/// `skip`/`limit` window as [`crate::features::Pagination`].
#[derive(Deserialize, Debug)]
pub struct BookListQuery {
    pub author_id: Option<i64>,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "crate::features::default_limit")]
    pub limit: NonZeroU32,
}

pub fn books_router() -> Router<AppState> {
    Router::new().route("/books/", get(list_books_handler).post(create_book_handler))
}

async fn list_books_handler(
    Query(query): Query<BookListQuery>,
    mut conn: DbConnection,
) -> ApiResult<Json<Vec<JsonBook>>> {
    let books =
        repo::list_books(&mut conn, query.author_id, query.skip, query.limit.get()).await?;

    Ok(Json(books.into_iter().map(JsonBook::from).collect()))
}

async fn create_book_handler(
    State(pool): State<SqlitePool>,
    Json(book): Json<BookCreate>,
) -> ApiResult<Json<JsonBook>> {
    let mut conn = DbConnection::acquire(&pool).await?;
    let created = repo::create_book(&mut conn, &book).await?;

    info!(
        book_id = created.id,
        author_id = created.author_id,
        book = %created,
        "created book"
    );

    Ok(Json(created.into()))
}
