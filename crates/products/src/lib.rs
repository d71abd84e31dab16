//! Products domain module.
//!
//! Catalog entries for a bulk-goods store: the product entity, the text-to-field
//! coercion used by the add-product form, validation before commit, and the
//! code-based category classifier. Pure domain logic (no IO, no UI).

pub mod category;
pub mod config;
pub mod field;
pub mod product;
pub mod validation;

pub use category::{
    CategoryFilter, CategoryRule, CategoryTable, CategoryTag, category_of, filter_by_category,
};
pub use self::config::StockControlConfig;
pub use field::FieldType;
pub use product::{DEFAULT_IMAGE, NewProduct, Product, new_empty_product, set_field_from_input};
pub use validation::{Alert, FieldLimits, ValidationError, Validator, validate};
