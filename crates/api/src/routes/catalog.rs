//! Route definitions for the catalog pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes, mounted at the root.
///
/// ```text
/// GET         /                   -> index
/// GET         /demo1              -> list_authors
/// GET, POST   /demo2              -> add_book_form, submit_book
/// GET         /delbook/{bookid}   -> delete_book
/// GET         /delauth/{authid}   -> delete_author
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/demo1", get(catalog::list_authors))
        .route(
            "/demo2",
            get(catalog::add_book_form).post(catalog::submit_book),
        )
        .route("/delbook/{bookid}", get(catalog::delete_book))
        .route("/delauth/{authid}", get(catalog::delete_author))
}
