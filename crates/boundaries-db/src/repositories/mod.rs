//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod row_mappers;
mod sqlite_boundary_repository;
mod sqlite_boundary_set_repository;

pub use sqlite_boundary_repository::SqliteBoundaryRepository;
pub use sqlite_boundary_set_repository::SqliteBoundarySetRepository;
