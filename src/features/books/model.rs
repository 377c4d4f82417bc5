use chrono::NaiveDate;
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", title)]
pub struct DbBook {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct JsonBook {
    pub id: i64,
    pub title: String,
    pub summary: Option<String>,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}

// request body for POST /books/
#[derive(Deserialize, Debug, Clone)]
pub struct BookCreate {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub publication_date: NaiveDate,
    pub author_id: i64,
}

impl From<DbBook> for JsonBook {
    fn from(book: DbBook) -> Self {
        Self {
            id: book.id,
            title: book.title,
            summary: book.summary,
            publication_date: book.publication_date,
            author_id: book.author_id,
        }
    }
}
