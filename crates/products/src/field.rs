use serde::{Deserialize, Serialize};

/// Which product attribute a piece of form text is meant for.
///
/// Variants are declared in the add-product form's field order, so the derived
/// `Ord` matches the order fields are presented in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Id,
    Code,
    Name,
    Image,
    Description,
    Ingredients,
    Price,
    Quantity,
}

impl FieldType {
    /// Every field, in form order.
    pub const ALL: [FieldType; 8] = [
        FieldType::Id,
        FieldType::Code,
        FieldType::Name,
        FieldType::Image,
        FieldType::Description,
        FieldType::Ingredients,
        FieldType::Price,
        FieldType::Quantity,
    ];

    /// Label shown next to the form input.
    pub fn label(self) -> &'static str {
        match self {
            FieldType::Id => "ID",
            FieldType::Code => "Code",
            FieldType::Name => "Name",
            FieldType::Image => "Image",
            FieldType::Description => "Description",
            FieldType::Ingredients => "Ingredients",
            FieldType::Price => "Price",
            FieldType::Quantity => "Quantity",
        }
    }

    /// Numeric fields collapse malformed input to zero.
    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Id | FieldType::Price | FieldType::Quantity)
    }

    /// Message shown when the field is required but was left empty.
    pub fn invalid_field_description(self) -> &'static str {
        match self {
            FieldType::Id => "Please enter a valid product ID.",
            FieldType::Code => "Please enter a product code.",
            FieldType::Name => "Please enter a product name.",
            FieldType::Image => "Please enter a valid image URL.",
            FieldType::Description => "Please enter a product description.",
            FieldType::Ingredients => "Please enter the product ingredients.",
            FieldType::Price => "Please enter a valid price (pence per 0.5 kg).",
            FieldType::Quantity => "Please enter a valid quantity (kg).",
        }
    }

    /// Message shown when the field's text is longer than allowed.
    pub fn length_exceeded_description(self) -> &'static str {
        match self {
            FieldType::Code => "The product code is too long.",
            FieldType::Name => "The product name is too long.",
            FieldType::Image => "The image URL is too long.",
            FieldType::Description => "The product description is too long.",
            FieldType::Ingredients => "The ingredients list is too long.",
            FieldType::Id | FieldType::Price | FieldType::Quantity => "The value is too long.",
        }
    }
}

impl core::fmt::Display for FieldType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_is_in_form_order() {
        let mut sorted = FieldType::ALL;
        sorted.sort();
        assert_eq!(sorted, FieldType::ALL);
        assert_eq!(FieldType::ALL.first(), Some(&FieldType::Id));
        assert_eq!(FieldType::ALL.last(), Some(&FieldType::Quantity));
    }

    #[test]
    fn only_id_price_and_quantity_are_numeric() {
        let numeric: Vec<_> = FieldType::ALL.into_iter().filter(|f| f.is_numeric()).collect();
        assert_eq!(numeric, vec![FieldType::Id, FieldType::Price, FieldType::Quantity]);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(FieldType::Ingredients.to_string(), "Ingredients");
        assert_eq!(FieldType::Id.to_string(), "ID");
    }
}
