//! Pre-commit validation of products.
//!
//! Only text fields are checked here. Numeric fields were already normalized to
//! non-negative values when the form text was applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockctl_core::ValueObject;

use crate::field::FieldType;
use crate::product::Product;

/// Required text fields, in the order they are checked.
const REQUIRED_TEXT_FIELDS: [FieldType; 4] = [
    FieldType::Code,
    FieldType::Name,
    FieldType::Description,
    FieldType::Ingredients,
];

/// First problem found in a product.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// A required text field was empty.
    #[error("{0} is required")]
    InvalidField(FieldType),

    /// A text field is longer than its configured maximum.
    #[error("{0} exceeds its maximum length")]
    StringLengthExceeded(FieldType),
}

impl ValidationError {
    pub fn field(self) -> FieldType {
        match self {
            ValidationError::InvalidField(field) | ValidationError::StringLengthExceeded(field) => {
                field
            }
        }
    }

    /// Dialog contents for the shell.
    pub fn alert(self) -> Alert {
        match self {
            ValidationError::InvalidField(field) => Alert {
                title: format!("{} ERROR", field.label().to_uppercase()),
                message: field.invalid_field_description().to_string(),
            },
            ValidationError::StringLengthExceeded(field) => Alert {
                title: "Error!".to_string(),
                message: field.length_exceeded_description().to_string(),
            },
        }
    }
}

/// Human-readable error dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

/// Maximum length, in characters, of each required text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLimits {
    pub code: usize,
    pub name: usize,
    pub description: usize,
    pub ingredients: usize,
}

impl Default for FieldLimits {
    fn default() -> Self {
        Self {
            code: 16,
            name: 64,
            description: 256,
            ingredients: 512,
        }
    }
}

impl ValueObject for FieldLimits {}

impl FieldLimits {
    /// `None` for fields without a length limit.
    pub fn max_len(&self, field: FieldType) -> Option<usize> {
        match field {
            FieldType::Code => Some(self.code),
            FieldType::Name => Some(self.name),
            FieldType::Description => Some(self.description),
            FieldType::Ingredients => Some(self.ingredients),
            FieldType::Id | FieldType::Image | FieldType::Price | FieldType::Quantity => None,
        }
    }
}

/// Checks products against a set of [`FieldLimits`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    limits: FieldLimits,
}

impl Validator {
    pub fn new(limits: FieldLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &FieldLimits {
        &self.limits
    }

    /// Reports the first violation: every emptiness check runs before any length
    /// check, each in code, name, description, ingredients order.
    pub fn validate(&self, product: &Product) -> Result<(), ValidationError> {
        for field in REQUIRED_TEXT_FIELDS {
            if text_of(product, field).trim().is_empty() {
                return Err(ValidationError::InvalidField(field));
            }
        }

        for field in REQUIRED_TEXT_FIELDS {
            let Some(max) = self.limits.max_len(field) else {
                continue;
            };
            if text_of(product, field).chars().count() > max {
                return Err(ValidationError::StringLengthExceeded(field));
            }
        }

        Ok(())
    }
}

/// Validates with the default limits.
pub fn validate(product: &Product) -> Result<(), ValidationError> {
    Validator::default().validate(product)
}

fn text_of(product: &Product, field: FieldType) -> &str {
    match field {
        FieldType::Code => product.code(),
        FieldType::Name => product.name(),
        FieldType::Description => product.description(),
        FieldType::Ingredients => product.ingredients(),
        FieldType::Image => product.image(),
        FieldType::Id | FieldType::Price | FieldType::Quantity => "",
    }
}
