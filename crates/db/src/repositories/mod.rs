//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement writes open
//! their own transaction; an early return drops it, which rolls back.

pub mod author_repo;
pub mod book_repo;

pub use author_repo::AuthorRepo;
pub use book_repo::BookRepo;
