//! Product catalog records.
//!
//! Field-level rules for products live here; collection-level rules (unique
//! names, id allocation, referential checks against orders) belong to the
//! service that owns the catalog.

pub mod product;

pub use product::{Product, ProductPatch, LOW_STOCK_THRESHOLD};
