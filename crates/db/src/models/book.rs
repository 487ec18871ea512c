//! Book entity model and DTOs.

use bookshelf_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub name: String,
    pub author_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a new book under an existing author.
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub name: String,
    pub author_id: DbId,
}
