pub mod model;
pub mod repo;

use crate::AppState;
use crate::db::DbConnection;
use crate::error::{ApiError, ApiResult, is_unique_violation};
use crate::features::Pagination;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use model::{AuthorCreate, JsonAuthor};
use sqlx::SqlitePool;
use tracing::info;

pub fn authors_router() -> Router<AppState> {
    Router::new()
        .route(
            "/authors/",
            get(list_authors_handler).post(create_author_handler),
        )
        .route("/authors/{author_id}/", get(get_author_handler))
}

async fn list_authors_handler(
    Query(pagination): Query<Pagination>,
    mut conn: DbConnection,
) -> ApiResult<Json<Vec<JsonAuthor>>> {
    let authors = repo::list_authors(&mut conn, pagination.skip, pagination.limit.get()).await?;

    Ok(Json(authors.into_iter().map(JsonAuthor::from).collect()))
}

async fn get_author_handler(
    Path(author_id): Path<i64>,
    mut conn: DbConnection,
) -> ApiResult<Json<JsonAuthor>> {
    match repo::get_author_by_id(&mut conn, author_id).await? {
        Some(author) => Ok(Json(author.into())),
        None => Err(ApiError::AuthorNotFound(author_id)),
    }
}

// uniqueness lives in the author.name constraint, so there is no lookup before the insert
async fn create_author_handler(
    State(pool): State<SqlitePool>,
    Json(author): Json<AuthorCreate>,
) -> ApiResult<Json<JsonAuthor>> {
    // the body is fully read and validated before a connection is taken
    let mut conn = DbConnection::acquire(&pool).await?;

    let created = repo::create_author(&mut conn, &author)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::AuthorNameTaken
            } else {
                ApiError::Database(e)
            }
        })?;

    info!(author_id = created.id, author = %created, "created author");

    Ok(Json(created.into()))
}
