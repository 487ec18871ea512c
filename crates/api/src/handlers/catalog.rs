//! Handlers for the catalog pages: listing, the add-book form, and deletes.
//!
//! Failures inside the add-book workflow are turned into notices on the
//! rendered page. Deletes of unknown ids are reported as `NotFound`.

use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use axum::Form;
use bookshelf_core::book_form::{BookForm, BookSubmission, BoundBookForm};
use bookshelf_core::error::CoreError;
use bookshelf_core::notice::Notice;
use bookshelf_core::types::DbId;
use bookshelf_db::models::book::CreateBook;
use bookshelf_db::repositories::{author_repo, book_repo, AuthorRepo, BookRepo};
use bookshelf_db::unique_violation;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// Where deletes send the browser afterwards.
const ADD_BOOK_PAGE: &str = "/demo2";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Run the add-book workflow for a validated submission.
///
/// Never fails: lookup and write errors are logged and reported as
/// [`Notice::Failed`]. A title taken by a concurrent insert is reported as
/// [`Notice::Duplicate`].
async fn add_book(pool: &PgPool, submission: &BookSubmission) -> Notice {
    match try_add_book(pool, submission).await {
        Ok(notice) => notice,
        Err(err) if unique_violation(&err) == Some(book_repo::NAME_CONSTRAINT) => {
            tracing::warn!(
                error = %err,
                book = %submission.book_name,
                "Book title taken by a concurrent insert",
            );
            Notice::Duplicate
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                author = %submission.author_name,
                book = %submission.book_name,
                "Failed to add book",
            );
            Notice::Failed
        }
    }
}

async fn try_add_book(pool: &PgPool, submission: &BookSubmission) -> Result<Notice, sqlx::Error> {
    let author = AuthorRepo::find_by_name(pool, &submission.author_name).await?;

    // Titles are unique across the whole catalog, whoever the author is.
    if BookRepo::find_by_name(pool, &submission.book_name)
        .await?
        .is_some()
    {
        return Ok(Notice::Duplicate);
    }

    match author {
        Some(author) => add_to_author(pool, author.id, &submission.book_name).await?,
        None => {
            match BookRepo::create_with_new_author(
                pool,
                &submission.author_name,
                &submission.book_name,
            )
            .await
            {
                Ok((author, book)) => {
                    tracing::info!(
                        book_id = book.id,
                        author_id = author.id,
                        "Book added with new author",
                    );
                }
                // A concurrent request created the author first; add the
                // book under that author instead.
                Err(err) if unique_violation(&err) == Some(author_repo::NAME_CONSTRAINT) => {
                    tracing::debug!(author = %submission.author_name, "Author created concurrently");
                    let author = AuthorRepo::find_by_name(pool, &submission.author_name)
                        .await?
                        .ok_or(err)?;
                    add_to_author(pool, author.id, &submission.book_name).await?;
                }
                Err(err) => return Err(err),
            }
        }
    }

    Ok(Notice::Submitted)
}

async fn add_to_author(pool: &PgPool, author_id: DbId, book_name: &str) -> Result<(), sqlx::Error> {
    let input = CreateBook {
        name: book_name.to_string(),
        author_id,
    };
    let book = BookRepo::create(pool, &input).await?;
    tracing::info!(book_id = book.id, author_id, "Book added");
    Ok(())
}

async fn render_add_book_page(
    pool: &PgPool,
    form: &BoundBookForm,
    notices: &[Notice],
) -> AppResult<Html<String>> {
    let authors = AuthorRepo::list_with_books(pool).await?;
    Ok(Html(views::add_book_page(&authors, form, notices)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
pub async fn index() -> &'static str {
    "hello world"
}

/// GET /demo1
///
/// All authors with their books, read-only.
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = AuthorRepo::list_with_books(&state.pool).await?;
    Ok(Html(views::author_list_page(&authors)))
}

/// GET /demo2
///
/// Empty add-book form plus the catalog.
pub async fn add_book_form(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_add_book_page(&state.pool, &BoundBookForm::empty(), &[Notice::Prompt]).await
}

/// POST /demo2
///
/// Validate the form and add the book, creating its author if needed. The
/// page is rendered directly with the outcome notice; the form is cleared
/// after a successful submission and keeps its values otherwise.
pub async fn submit_book(
    State(state): State<AppState>,
    Form(input): Form<BookForm>,
) -> AppResult<Html<String>> {
    let submission = match input.check() {
        Ok(submission) => submission,
        Err(bound) => {
            tracing::debug!("Add-book form failed validation");
            return render_add_book_page(&state.pool, &bound, &[Notice::Prompt]).await;
        }
    };

    let notice = add_book(&state.pool, &submission).await;
    let form = match notice {
        Notice::Submitted => BoundBookForm::empty(),
        _ => BoundBookForm::with_values(input.trimmed()),
    };

    render_add_book_page(&state.pool, &form, &[notice]).await
}

/// GET /delbook/{bookid}
///
/// Delete one book, then return to the add-book page.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<DbId>,
) -> AppResult<Redirect> {
    if !BookRepo::delete(&state.pool, book_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Book",
            id: book_id,
        }));
    }

    tracing::info!(book_id, "Book deleted");
    Ok(Redirect::to(ADD_BOOK_PAGE))
}

/// GET /delauth/{authid}
///
/// Delete an author together with all of its books, then return to the
/// add-book page.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(author_id): Path<DbId>,
) -> AppResult<Redirect> {
    let books_deleted = AuthorRepo::delete_with_books(&state.pool, author_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Author",
            id: author_id,
        }))?;

    tracing::info!(author_id, books_deleted, "Author deleted");
    Ok(Redirect::to(ADD_BOOK_PAGE))
}
