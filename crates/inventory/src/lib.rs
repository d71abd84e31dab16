//! Inventory domain module.
//!
//! The catalog of committed products and the stock operations allowed on them.
//! Deterministic in-memory logic (no IO, no storage); the shell owns the catalog.

pub mod catalog;
pub mod seed;

pub use catalog::{Catalog, CatalogError};
pub use seed::sample_catalog;
