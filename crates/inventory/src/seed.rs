//! Demo catalog shown before any products have been entered.

use stockctl_core::ProductId;
use stockctl_products::{NewProduct, Product};

use crate::catalog::{Catalog, CatalogError};

const IMAGE_BASE: &str = "http://www.bulkbarn.ca/app_themes/BulkBarn/Images/assets/products/full";

/// (code, name, image file, description, ingredients, price, quantity)
type SampleRow = (&'static str, &'static str, &'static str, &'static str, &'static str, u32, u32);

const SAMPLES: [SampleRow; 5] = [
    (
        "0001",
        "Red kidney beans",
        "BB_150910-0407-0265.png",
        "Dried dark red kidney beans",
        "red kidney beans",
        100,
        100,
    ),
    (
        "1001",
        "Raw almonds",
        "000120_Unsalted-Almonds-Dry-Roasted_cluster.png",
        "Unsalted raw almonds",
        "almonds",
        440,
        50,
    ),
    (
        "1002",
        "Raw cashews",
        "BB_150910-0125-0199.png",
        "Unsalted raw cashew nuts",
        "cashew nuts",
        650,
        50,
    ),
    (
        "3001",
        "Fusilli",
        "BB_150910-1644-0298.png",
        "Fusilli pasta, great for baked dishes",
        "durum wheat semolina, niacin, iron, riboflavin, thiamine mononitrate, folic acid",
        600,
        150,
    ),
    (
        "3102",
        "Brown long grain rice",
        "BB_150910-1602-0295.png",
        "Whole grain rice, ideal for savoury dishes",
        "brown long grain rice",
        650,
        100,
    ),
];

/// The sample products as uncommitted entries, ids unset.
pub fn sample_products() -> Vec<Product> {
    SAMPLES
        .iter()
        .map(|&(code, name, image, description, ingredients, price, quantity)| {
            Product::from(NewProduct {
                id: ProductId::UNSET,
                code: code.to_string(),
                name: name.to_string(),
                image: format!("{IMAGE_BASE}/{image}"),
                description: description.to_string(),
                ingredients: ingredients.to_string(),
                price,
                quantity,
            })
        })
        .collect()
}

/// A catalog holding the sample products, committed in order (ids 1..=5).
pub fn sample_catalog() -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    for product in sample_products() {
        catalog.commit(product)?;
    }
    Ok(catalog)
}
