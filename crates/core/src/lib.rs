//! Domain types and pure logic for the bookshelf catalog.
//!
//! Nothing in this crate touches the database or HTTP; the `db` and `api`
//! crates build on these types.

pub mod book_form;
pub mod error;
pub mod notice;
pub mod types;
