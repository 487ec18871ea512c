//! Integration tests for the author/book repositories.
//!
//! Exercises the repository layer against a real database:
//! - Create, lookup by id and by unique name
//! - Unique and foreign key constraint violations
//! - Transactional author + book insert and author + books delete
//! - Demo seeding

use bookshelf_db::models::author::CreateAuthor;
use bookshelf_db::models::book::CreateBook;
use bookshelf_db::repositories::{author_repo, book_repo, AuthorRepo, BookRepo};
use bookshelf_db::unique_violation;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_author(name: &str) -> CreateAuthor {
    CreateAuthor {
        name: name.to_string(),
    }
}

fn new_book(author_id: i64, name: &str) -> CreateBook {
    CreateBook {
        name: name.to_string(),
        author_id,
    }
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_author(pool: PgPool) {
    let author = AuthorRepo::create(&pool, &new_author("老王")).await.unwrap();
    assert_eq!(author.name, "老王");

    let by_id = AuthorRepo::find_by_id(&pool, author.id).await.unwrap();
    assert_eq!(by_id.unwrap().name, "老王");

    let by_name = AuthorRepo::find_by_name(&pool, "老王").await.unwrap();
    assert_eq!(by_name.unwrap().id, author.id);

    assert!(AuthorRepo::find_by_name(&pool, "老李").await.unwrap().is_none());
    assert!(AuthorRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_author_name_violates_unique(pool: PgPool) {
    AuthorRepo::create(&pool, &new_author("Dup")).await.unwrap();
    let err = AuthorRepo::create(&pool, &new_author("Dup")).await.unwrap_err();
    assert_eq!(unique_violation(&err), Some(author_repo::NAME_CONSTRAINT));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_with_books_groups_by_author(pool: PgPool) {
    let a = AuthorRepo::create(&pool, &new_author("A")).await.unwrap();
    let b = AuthorRepo::create(&pool, &new_author("B")).await.unwrap();
    let c = AuthorRepo::create(&pool, &new_author("C")).await.unwrap();
    BookRepo::create(&pool, &new_book(a.id, "a1")).await.unwrap();
    BookRepo::create(&pool, &new_book(b.id, "b1")).await.unwrap();
    BookRepo::create(&pool, &new_book(a.id, "a2")).await.unwrap();

    let listed = AuthorRepo::list_with_books(&pool).await.unwrap();
    assert_eq!(listed.len(), 3);

    assert_eq!(listed[0].author.id, a.id);
    let names: Vec<_> = listed[0].books.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["a1", "a2"]);

    assert_eq!(listed[1].author.id, b.id);
    assert_eq!(listed[1].books.len(), 1);

    assert_eq!(listed[2].author.id, c.id);
    assert!(listed[2].books.is_empty());
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_and_find_book(pool: PgPool) {
    let author = AuthorRepo::create(&pool, &new_author("老王")).await.unwrap();
    let book = BookRepo::create(&pool, &new_book(author.id, "测试书"))
        .await
        .unwrap();
    assert_eq!(book.author_id, author.id);

    let found = BookRepo::find_by_name(&pool, "测试书").await.unwrap().unwrap();
    assert_eq!(found.id, book.id);

    let found = BookRepo::find_by_id(&pool, book.id).await.unwrap().unwrap();
    assert_eq!(found.name, "测试书");

    let by_author = BookRepo::list_by_author(&pool, author.id).await.unwrap();
    assert_eq!(by_author.len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_book_titles_unique_across_authors(pool: PgPool) {
    let a = AuthorRepo::create(&pool, &new_author("A")).await.unwrap();
    let b = AuthorRepo::create(&pool, &new_author("B")).await.unwrap();
    BookRepo::create(&pool, &new_book(a.id, "Same")).await.unwrap();

    let err = BookRepo::create(&pool, &new_book(b.id, "Same"))
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err), Some(book_repo::NAME_CONSTRAINT));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_book_requires_existing_author(pool: PgPool) {
    let err = BookRepo::create(&pool, &new_book(424_242, "Orphan"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            // PostgreSQL foreign key violation.
            assert_eq!(db_err.code().as_deref(), Some("23503"));
        }
        other => panic!("expected database error, got {other}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_book_leaves_author_and_siblings(pool: PgPool) {
    let author = AuthorRepo::create(&pool, &new_author("A")).await.unwrap();
    let keep = BookRepo::create(&pool, &new_book(author.id, "keep")).await.unwrap();
    let gone = BookRepo::create(&pool, &new_book(author.id, "gone")).await.unwrap();

    assert!(BookRepo::delete(&pool, gone.id).await.unwrap());
    assert!(!BookRepo::delete(&pool, gone.id).await.unwrap());

    let remaining = BookRepo::list(&pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
    assert!(AuthorRepo::find_by_id(&pool, author.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_new_author_links_book(pool: PgPool) {
    let (author, book) = BookRepo::create_with_new_author(&pool, "New", "First")
        .await
        .unwrap();
    assert_eq!(book.author_id, author.id);
    assert_eq!(count(&pool, "authors").await, 1);
    assert_eq!(count(&pool, "books").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_new_author_rolls_back_on_book_failure(pool: PgPool) {
    let existing = AuthorRepo::create(&pool, &new_author("Old")).await.unwrap();
    BookRepo::create(&pool, &new_book(existing.id, "Taken"))
        .await
        .unwrap();

    let err = BookRepo::create_with_new_author(&pool, "New", "Taken")
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err), Some(book_repo::NAME_CONSTRAINT));

    // The author insert must not survive the failed book insert.
    assert!(AuthorRepo::find_by_name(&pool, "New").await.unwrap().is_none());
    assert_eq!(count(&pool, "authors").await, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_new_author_reports_author_constraint(pool: PgPool) {
    // Another writer created the author between lookup and insert.
    AuthorRepo::create(&pool, &new_author("Racer")).await.unwrap();

    let err = BookRepo::create_with_new_author(&pool, "Racer", "Fresh")
        .await
        .unwrap_err();
    assert_eq!(unique_violation(&err), Some(author_repo::NAME_CONSTRAINT));
    assert!(BookRepo::find_by_name(&pool, "Fresh").await.unwrap().is_none());
}

#[test]
fn non_database_errors_are_not_unique_violations() {
    assert_eq!(unique_violation(&sqlx::Error::RowNotFound), None);
    assert_eq!(unique_violation(&sqlx::Error::PoolClosed), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_with_books_removes_only_that_author(pool: PgPool) {
    let a = AuthorRepo::create(&pool, &new_author("A")).await.unwrap();
    let b = AuthorRepo::create(&pool, &new_author("B")).await.unwrap();
    BookRepo::create(&pool, &new_book(a.id, "a1")).await.unwrap();
    BookRepo::create(&pool, &new_book(a.id, "a2")).await.unwrap();
    BookRepo::create(&pool, &new_book(b.id, "b1")).await.unwrap();

    let removed = AuthorRepo::delete_with_books(&pool, a.id).await.unwrap();
    assert_eq!(removed, Some(2));

    assert!(AuthorRepo::find_by_id(&pool, a.id).await.unwrap().is_none());
    assert!(BookRepo::list_by_author(&pool, a.id).await.unwrap().is_empty());
    assert!(AuthorRepo::find_by_id(&pool, b.id).await.unwrap().is_some());
    assert_eq!(BookRepo::list_by_author(&pool, b.id).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_with_books_missing_author(pool: PgPool) {
    let removed = AuthorRepo::delete_with_books(&pool, 999_999).await.unwrap();
    assert_eq!(removed, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_author_without_books(pool: PgPool) {
    let a = AuthorRepo::create(&pool, &new_author("Lonely")).await.unwrap();
    let removed = AuthorRepo::delete_with_books(&pool, a.id).await.unwrap();
    assert_eq!(removed, Some(0));
    assert_eq!(count(&pool, "authors").await, 0);
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_reset_and_seed_loads_demo_catalog(pool: PgPool) {
    AuthorRepo::create(&pool, &new_author("Stale")).await.unwrap();

    bookshelf_db::seed::reset_and_seed(&pool).await.unwrap();
    // Running it twice must not trip the unique constraints.
    bookshelf_db::seed::reset_and_seed(&pool).await.unwrap();

    assert_eq!(count(&pool, "authors").await, 3);
    assert_eq!(count(&pool, "books").await, 5);
    assert!(AuthorRepo::find_by_name(&pool, "Stale").await.unwrap().is_none());

    let wang = AuthorRepo::find_by_name(&pool, "老王").await.unwrap().unwrap();
    assert_eq!(wang.id, 1);
    let books = BookRepo::list_by_author(&pool, wang.id).await.unwrap();
    let names: Vec<_> = books.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["老王回忆录", "我读书少，你别骗我"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_health_check(pool: PgPool) {
    bookshelf_db::health_check(&pool).await.unwrap();
}
