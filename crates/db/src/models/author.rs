//! Author entity model and DTOs.

use bookshelf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::book::Book;

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new author.
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
}

/// An author together with all books referencing it.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorWithBooks {
    #[serde(flatten)]
    pub author: Author,
    pub books: Vec<Book>,
}
