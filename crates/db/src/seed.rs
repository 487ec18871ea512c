//! Demo catalog loaded at startup when `SEED_DEMO_DATA` is enabled.

use bookshelf_core::types::DbId;
use sqlx::PgPool;

/// Authors and their books, in insertion order.
pub const DEMO_CATALOG: &[(&str, &[&str])] = &[
    ("老王", &["老王回忆录", "我读书少，你别骗我"]),
    ("老尹", &["如何才能让自己更骚"]),
    ("老刘", &["怎样征服美丽少女", "如何征服英俊少男"]),
];

/// Wipe both tables and load [`DEMO_CATALOG`] in one transaction.
///
/// Identities restart, so the first author gets id 1.
pub async fn reset_and_seed(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE books, authors RESTART IDENTITY")
        .execute(&mut *tx)
        .await?;

    let mut book_count = 0usize;
    for (author_name, books) in DEMO_CATALOG {
        let (author_id,): (DbId,) =
            sqlx::query_as("INSERT INTO authors (name) VALUES ($1) RETURNING id")
                .bind(*author_name)
                .fetch_one(&mut *tx)
                .await?;

        for book_name in *books {
            sqlx::query("INSERT INTO books (name, author_id) VALUES ($1, $2)")
                .bind(*book_name)
                .bind(author_id)
                .execute(&mut *tx)
                .await?;
            book_count += 1;
        }
    }

    tx.commit().await?;
    tracing::info!(
        authors = DEMO_CATALOG.len(),
        books = book_count,
        "Demo catalog seeded"
    );
    Ok(())
}
