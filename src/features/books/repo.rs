use super::model::{BookCreate, DbBook};
use crate::features::clamp_offset;
use sqlx::SqliteConnection;

pub async fn list_books(
    conn: &mut SqliteConnection,
    author_id: Option<i64>,
    skip: u64,
    limit: u32,
) -> sqlx::Result<Vec<DbBook>> {
    // a NULL filter matches every row
    sqlx::query_as::<_, DbBook>(
        r#"
        SELECT id, title, summary, publication_date, author_id FROM book
        WHERE ?1 IS NULL OR author_id = ?1
        ORDER BY id
        LIMIT ?2 OFFSET ?3
        "#,
    )
    .bind(author_id)
    .bind(limit)
    .bind(clamp_offset(skip))
    .fetch_all(conn)
    .await
}

// author_id is stored as given; nothing checks that the author exists
pub async fn create_book(conn: &mut SqliteConnection, book: &BookCreate) -> sqlx::Result<DbBook> {
    sqlx::query_as::<_, DbBook>(
        r#"
        INSERT INTO book (title, summary, publication_date, author_id)
        VALUES (?, ?, ?, ?)
        RETURNING id, title, summary, publication_date, author_id
        "#,
    )
    .bind(&book.title)
    .bind(&book.summary)
    .bind(book.publication_date)
    .bind(book.author_id)
    .fetch_one(conn)
    .await
}
