//! Core services - orchestration over the ports.
//!
//! Services here don't know about concrete implementations; they receive
//! repositories and the URL resolver from the composition root.

mod catalog;

pub use catalog::{CatalogService, SetCompleteness, SetLoad};
