//! Repository for the `authors` table.

use std::collections::HashMap;

use bookshelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::{Author, AuthorWithBooks, CreateAuthor};
use crate::models::book::Book;
use crate::repositories::book_repo;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, created_at";

/// Unique constraint on `authors.name`.
pub const NAME_CONSTRAINT: &str = "uq_authors_name";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    /// Insert a new author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAuthor) -> Result<Author, sqlx::Error> {
        let query = format!("INSERT INTO authors (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    /// List all authors in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors ORDER BY id");
        sqlx::query_as::<_, Author>(&query).fetch_all(pool).await
    }

    /// Find an author by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an author by its unique name (exact match).
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE name = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List every author with its books, authors and books both in id order.
    ///
    /// Two queries; books are grouped by `author_id` in memory.
    pub async fn list_with_books(pool: &PgPool) -> Result<Vec<AuthorWithBooks>, sqlx::Error> {
        let authors = Self::list(pool).await?;

        let query = format!("SELECT {} FROM books ORDER BY id", book_repo::COLUMNS);
        let books = sqlx::query_as::<_, Book>(&query).fetch_all(pool).await?;

        let mut by_author: HashMap<DbId, Vec<Book>> = HashMap::new();
        for book in books {
            by_author.entry(book.author_id).or_default().push(book);
        }

        Ok(authors
            .into_iter()
            .map(|author| {
                let books = by_author.remove(&author.id).unwrap_or_default();
                AuthorWithBooks { author, books }
            })
            .collect())
    }

    /// Delete an author and all of its books in one transaction.
    ///
    /// Books go first since `books.author_id` does not cascade. Returns
    /// `None` if no author with the given `id` exists (nothing is deleted),
    /// otherwise the number of books removed.
    pub async fn delete_with_books(pool: &PgPool, id: DbId) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM authors WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let books = sqlx::query("DELETE FROM books WHERE author_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(books.rows_affected()))
    }
}
