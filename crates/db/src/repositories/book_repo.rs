//! Repository for the `books` table.

use bookshelf_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::Author;
use crate::models::book::{Book, CreateBook};
use crate::repositories::author_repo;

/// Column list shared across queries to avoid repetition.
pub(crate) const COLUMNS: &str = "id, name, author_id, created_at";

/// Unique constraint on `books.name`.
pub const NAME_CONSTRAINT: &str = "uq_books_name";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a new book under an existing author, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBook) -> Result<Book, sqlx::Error> {
        let query = format!(
            "INSERT INTO books (name, author_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Book>(&query)
            .bind(&input.name)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new author and its first book in one transaction.
    ///
    /// If the book insert fails the author insert is rolled back too.
    pub async fn create_with_new_author(
        pool: &PgPool,
        author_name: &str,
        book_name: &str,
    ) -> Result<(Author, Book), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO authors (name) VALUES ($1) RETURNING {}",
            author_repo::COLUMNS
        );
        let author = sqlx::query_as::<_, Author>(&query)
            .bind(author_name)
            .fetch_one(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO books (name, author_id) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(book_name)
            .bind(author.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok((author, book))
    }

    /// List all books in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books ORDER BY id");
        sqlx::query_as::<_, Book>(&query).fetch_all(pool).await
    }

    /// Find a book by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE id = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a book by its title. Titles are unique across all authors.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE name = $1");
        sqlx::query_as::<_, Book>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List the books of one author, in insertion order.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Book>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM books WHERE author_id = $1 ORDER BY id");
        sqlx::query_as::<_, Book>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a book by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
