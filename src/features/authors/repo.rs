use super::model::{AuthorCreate, DbAuthor};
use crate::features::clamp_offset;
use sqlx::SqliteConnection;

pub async fn list_authors(
    conn: &mut SqliteConnection,
    skip: u64,
    limit: u32,
) -> sqlx::Result<Vec<DbAuthor>> {
    sqlx::query_as::<_, DbAuthor>(
        r#"
        SELECT id, name, bio FROM author
        ORDER BY id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(limit)
    .bind(clamp_offset(skip))
    .fetch_all(conn)
    .await
}

pub async fn get_author_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> sqlx::Result<Option<DbAuthor>> {
    sqlx::query_as::<_, DbAuthor>("SELECT id, name, bio FROM author WHERE name = ? ORDER BY id LIMIT 1")
        .bind(name)
        .fetch_optional(conn)
        .await
}

pub async fn get_author_by_id(
    conn: &mut SqliteConnection,
    author_id: i64,
) -> sqlx::Result<Option<DbAuthor>> {
    sqlx::query_as::<_, DbAuthor>("SELECT id, name, bio FROM author WHERE id = ?")
        .bind(author_id)
        .fetch_optional(conn)
        .await
}

// a duplicate name comes back as the raw UNIQUE violation, callers decide what it means
pub async fn create_author(
    conn: &mut SqliteConnection,
    author: &AuthorCreate,
) -> sqlx::Result<DbAuthor> {
    sqlx::query_as::<_, DbAuthor>(
        r#"
        INSERT INTO author (name, bio)
        VALUES (?, ?)
        RETURNING id, name, bio
        "#,
    )
    .bind(&author.name)
    .bind(&author.bio)
    .fetch_one(conn)
    .await
}
