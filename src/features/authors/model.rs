use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(sqlx::FromRow, Debug, Eq, PartialEq, Clone, Display)]
#[display("{}", name)]
pub struct DbAuthor {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Eq, PartialEq, Clone)]
pub struct JsonAuthor {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
}

// request body for POST /authors/
#[derive(Deserialize, Debug, Clone)]
pub struct AuthorCreate {
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<DbAuthor> for JsonAuthor {
    fn from(author: DbAuthor) -> Self {
        Self {
            id: author.id,
            name: author.name,
            bio: author.bio,
        }
    }
}
