use serde::{Deserialize, Serialize};
use validator::ValidateUrl;

use stockctl_core::{Entity, ProductId};

use crate::category::{CategoryTable, CategoryTag};
use crate::field::FieldType;

/// Placeholder shown for products without a usable image URL.
pub const DEFAULT_IMAGE: &str =
    "https://www.bulkbarn.ca/app_themes/BulkBarn/Images/assets/products/full/cat1/MissingImage_BB.png";

/// URL schemes accepted for product images.
const IMAGE_SCHEMES: [&str; 6] = ["http", "https", "ftp", "file", "jar", "mailto"];

/// A catalog entry and its stock, split between the store (warehouse) and the shop floor.
///
/// `price` is in pence per 0.5 kg; quantities are in kilograms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: String,
    name: String,
    image: String,
    description: String,
    ingredients: String,
    price: u32,
    store_quantity: i64,
    floor_quantity: i64,
}

/// Everything needed to build a fully populated product in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub ingredients: String,
    pub price: u32,
    /// Initial stock, placed in the store.
    pub quantity: u32,
}

impl Default for Product {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<NewProduct> for Product {
    fn from(new: NewProduct) -> Self {
        let mut product = Self {
            id: new.id,
            code: new.code,
            name: new.name,
            image: DEFAULT_IMAGE.to_string(),
            description: new.description,
            ingredients: new.ingredients,
            price: new.price,
            store_quantity: i64::from(new.quantity),
            floor_quantity: 0,
        };
        if !new.image.is_empty() {
            product.set_image(&new.image);
        }
        product
    }
}

impl Product {
    /// A blank product, as created when the add-product form opens.
    pub fn empty() -> Self {
        Self {
            id: ProductId::UNSET,
            code: String::new(),
            name: String::new(),
            image: DEFAULT_IMAGE.to_string(),
            description: String::new(),
            ingredients: String::new(),
            price: 0,
            store_quantity: 0,
            floor_quantity: 0,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn ingredients(&self) -> &str {
        &self.ingredients
    }

    pub fn price(&self) -> u32 {
        self.price
    }

    pub fn store_quantity(&self) -> i64 {
        self.store_quantity
    }

    pub fn floor_quantity(&self) -> i64 {
        self.floor_quantity
    }

    /// Store plus floor stock, in kilograms. Saturates at `i64::MAX`.
    pub fn total_stock_quantity(&self) -> i64 {
        self.store_quantity.saturating_add(self.floor_quantity)
    }

    /// Category under the standard code table.
    ///
    /// Ignores any configured table; a catalog built from a custom
    /// `categories` config classifies through `Catalog::category_of` instead.
    pub fn category(&self) -> CategoryTag {
        CategoryTable::standard().category_of(&self.code)
    }

    /// Text for a given field, as it would be shown back in the form.
    pub fn field_text(&self, field: FieldType) -> String {
        match field {
            FieldType::Id => self.id.to_string(),
            FieldType::Code => self.code.clone(),
            FieldType::Name => self.name.clone(),
            FieldType::Image => self.image.clone(),
            FieldType::Description => self.description.clone(),
            FieldType::Ingredients => self.ingredients.clone(),
            FieldType::Price => self.price.to_string(),
            FieldType::Quantity => self.store_quantity.to_string(),
        }
    }

    /// Assigns the catalog id; used when a product with an unset id is committed.
    pub fn set_id(&mut self, id: ProductId) {
        self.id = id;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_ingredients(&mut self, ingredients: impl Into<String>) {
        self.ingredients = ingredients.into();
    }

    pub fn set_price(&mut self, price: u32) {
        self.price = price;
    }

    /// Stores `image` if it parses as a URL with a known scheme (http, https,
    /// ftp, file, jar, mailto), otherwise falls back to [`DEFAULT_IMAGE`].
    pub fn set_image(&mut self, image: &str) {
        let candidate = image.to_owned();
        if has_image_scheme(image) && candidate.validate_url() {
            self.image = candidate;
        } else {
            tracing::warn!(input = %image, "image string is not a valid URL; using default image");
            self.image = DEFAULT_IMAGE.to_string();
        }
    }

    /// Adds `weight` kilograms to the store quantity.
    ///
    /// Unchecked: a negative result is possible and must be prevented by the
    /// caller. Saturates instead of overflowing.
    pub fn update_store_quantity(&mut self, weight: i64) {
        self.store_quantity = self.store_quantity.saturating_add(weight);
    }

    /// Adds `weight` kilograms to the floor quantity.
    ///
    /// Unchecked: a negative result is possible and must be prevented by the
    /// caller. Saturates instead of overflowing.
    pub fn update_floor_quantity(&mut self, weight: i64) {
        self.floor_quantity = self.floor_quantity.saturating_add(weight);
    }

    /// Coerces form text into the attribute selected by `field`.
    ///
    /// Numeric fields keep `0` for anything that is not a plain non-negative
    /// integer literal. Empty image text resets to the default image. Text
    /// fields are stored verbatim. Nothing here fails; validation runs later.
    pub fn set_field_from_input(&mut self, input: &str, field: FieldType) {
        match field {
            FieldType::Id => self.id = ProductId::new(parse_non_negative(input).unwrap_or(0)),
            FieldType::Code => self.code = input.to_string(),
            FieldType::Name => self.name = input.to_string(),
            FieldType::Image => {
                if input.is_empty() {
                    self.image = DEFAULT_IMAGE.to_string();
                } else {
                    self.set_image(input);
                }
            }
            FieldType::Description => self.description = input.to_string(),
            FieldType::Ingredients => self.ingredients = input.to_string(),
            FieldType::Price => self.price = parse_non_negative(input).unwrap_or(0),
            FieldType::Quantity => {
                self.store_quantity = i64::from(parse_non_negative(input).unwrap_or(0));
            }
        }
    }

    /// By-value form of [`Product::set_field_from_input`].
    pub fn with_input(mut self, field: FieldType, input: &str) -> Self {
        self.set_field_from_input(input, field);
        self
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Starts an add-product workflow.
pub fn new_empty_product() -> Product {
    Product::empty()
}

/// Routes form text to `product`'s attribute for `field`.
pub fn set_field_from_input(product: &mut Product, input: &str, field: FieldType) {
    product.set_field_from_input(input, field);
}

fn has_image_scheme(image: &str) -> bool {
    image
        .split_once(':')
        .is_some_and(|(scheme, _)| IMAGE_SCHEMES.iter().any(|known| scheme.eq_ignore_ascii_case(known)))
}

/// ASCII digits only; no sign, no whitespace, must fit in a `u32`.
fn parse_non_negative(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    input.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn almonds() -> Product {
        Product::from(NewProduct {
            id: ProductId::new(2),
            code: "1001".to_string(),
            name: "Raw almonds".to_string(),
            image: "http://www.bulkbarn.ca/app_themes/BulkBarn/Images/assets/products/full/000120_Unsalted-Almonds-Dry-Roasted_cluster.png".to_string(),
            description: "Unsalted raw almonds".to_string(),
            ingredients: "almonds".to_string(),
            price: 440,
            quantity: 50,
        })
    }

    #[test]
    fn empty_product_has_defaults() {
        let product = new_empty_product();
        assert!(product.id().is_unset());
        assert_eq!(product.code(), "");
        assert_eq!(product.name(), "");
        assert_eq!(product.image(), DEFAULT_IMAGE);
        assert_eq!(product.price(), 0);
        assert_eq!(product.store_quantity(), 0);
        assert_eq!(product.floor_quantity(), 0);
        assert_eq!(product.total_stock_quantity(), 0);
        assert_eq!(Product::default(), product);
    }

    #[test]
    fn new_product_starts_with_everything_in_store() {
        let mut product = almonds();
        assert_eq!(product.store_quantity(), 50);
        assert_eq!(product.floor_quantity(), 0);
        assert_eq!(product.total_stock_quantity(), 50);

        product.update_floor_quantity(20);
        assert_eq!(product.total_stock_quantity(), 70);
    }

    #[test]
    fn new_product_with_empty_image_uses_default() {
        let product = Product::from(NewProduct {
            id: ProductId::UNSET,
            code: "0001".to_string(),
            name: "Red kidney beans".to_string(),
            image: String::new(),
            description: "Dried dark red kidney beans".to_string(),
            ingredients: "red kidney beans".to_string(),
            price: 100,
            quantity: 100,
        });
        assert_eq!(product.image(), DEFAULT_IMAGE);
    }

    #[test]
    fn set_image_keeps_valid_urls() {
        let mut product = Product::empty();
        product.set_image("https://example.com/beans.png");
        assert_eq!(product.image(), "https://example.com/beans.png");
    }

    #[test]
    fn set_image_falls_back_on_malformed_url() {
        let mut product = almonds();
        product.set_image("not a url");
        assert_eq!(product.image(), DEFAULT_IMAGE);

        product.set_image("https://example.com/a.png");
        product.set_image("");
        assert_eq!(product.image(), DEFAULT_IMAGE);
    }

    #[test]
    fn set_image_rejects_unknown_schemes() {
        for input in [
            "C:\\images\\x.png",
            "localhost:8080/x.png",
            "javascript:alert(1)",
            "beans.png:x",
        ] {
            let product = new_empty_product().with_input(FieldType::Image, input);
            assert_eq!(product.image(), DEFAULT_IMAGE, "image for {input:?}");
        }
    }

    #[test]
    fn set_image_accepts_known_schemes() {
        for input in [
            "http://example.com/a.png",
            "HTTPS://example.com/a.png",
            "ftp://files.example.com/a.png",
            "file:///srv/images/a.png",
        ] {
            let product = new_empty_product().with_input(FieldType::Image, input);
            assert_eq!(product.image(), input);
        }
    }

    #[test]
    fn quantity_updates_saturate() {
        let mut product = almonds();
        product.update_store_quantity(i64::MAX);
        product.update_floor_quantity(i64::MAX);
        product.update_floor_quantity(1);
        assert_eq!(product.store_quantity(), i64::MAX);
        assert_eq!(product.floor_quantity(), i64::MAX);
        assert_eq!(product.total_stock_quantity(), i64::MAX);
    }

    #[test]
    fn empty_image_input_resets_to_default() {
        let mut product = Product::empty().with_input(FieldType::Image, "https://example.com/a.png");
        assert_eq!(product.image(), "https://example.com/a.png");

        product.set_field_from_input("", FieldType::Image);
        assert_eq!(product.image(), DEFAULT_IMAGE);
    }

    #[test]
    fn numeric_input_parses_plain_integers() {
        let product = Product::empty()
            .with_input(FieldType::Id, "12")
            .with_input(FieldType::Price, "440")
            .with_input(FieldType::Quantity, "50");
        assert_eq!(product.id(), ProductId::new(12));
        assert_eq!(product.price(), 440);
        assert_eq!(product.store_quantity(), 50);
    }

    #[test]
    fn malformed_numeric_input_collapses_to_zero() {
        for input in ["", "abc", "-5", "+5", " 5", "4.5", "99999999999999999999"] {
            let product = Product::empty()
                .with_input(FieldType::Price, "100")
                .with_input(FieldType::Price, input)
                .with_input(FieldType::Quantity, input)
                .with_input(FieldType::Id, input);
            assert_eq!(product.price(), 0, "price for {input:?}");
            assert_eq!(product.store_quantity(), 0, "quantity for {input:?}");
            assert!(product.id().is_unset(), "id for {input:?}");
        }
    }

    #[test]
    fn text_input_is_stored_verbatim() {
        let mut product = Product::empty();
        set_field_from_input(&mut product, "  Fusilli ", FieldType::Name);
        set_field_from_input(&mut product, "3001", FieldType::Code);
        set_field_from_input(&mut product, "", FieldType::Description);
        set_field_from_input(&mut product, "durum wheat semolina", FieldType::Ingredients);
        assert_eq!(product.name(), "  Fusilli ");
        assert_eq!(product.code(), "3001");
        assert_eq!(product.description(), "");
        assert_eq!(product.ingredients(), "durum wheat semolina");
    }

    #[test]
    fn quantity_input_only_touches_store() {
        let mut product = almonds();
        product.update_floor_quantity(5);
        product.set_field_from_input("10", FieldType::Quantity);
        assert_eq!(product.store_quantity(), 10);
        assert_eq!(product.floor_quantity(), 5);
    }

    #[test]
    fn quantity_updates_are_unchecked() {
        let mut product = almonds();
        product.update_store_quantity(-60);
        assert_eq!(product.store_quantity(), -10);
    }

    #[test]
    fn field_text_round_trips_through_input() {
        let original = almonds();
        let mut copy = Product::empty();
        for field in FieldType::ALL {
            copy.set_field_from_input(&original.field_text(field), field);
        }
        assert_eq!(copy, original);
    }

    #[test]
    fn category_comes_from_code() {
        assert_eq!(almonds().category(), CategoryTag::Nuts);
    }

    #[test]
    fn serializes_for_the_shell() {
        let json = serde_json::to_value(almonds()).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["code"], "1001");
        assert_eq!(json["store_quantity"], 50);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: store updates accumulate and the total stays consistent.
            #[test]
            fn store_updates_accumulate(q1 in 0i64..1_000_000, q2 in 0i64..1_000_000, floor in 0i64..1_000) {
                let mut product = Product::empty();
                product.update_floor_quantity(floor);
                let original = product.store_quantity();

                product.update_store_quantity(q1);
                product.update_store_quantity(q2);

                prop_assert_eq!(product.store_quantity(), original + q1 + q2);
                prop_assert_eq!(
                    product.total_stock_quantity(),
                    product.store_quantity() + product.floor_quantity()
                );
            }

            /// Property: any non-numeric text sets numeric fields to zero.
            #[test]
            fn non_numeric_input_is_zero(input in "[a-zA-Z .,-]{0,20}") {
                let product = Product::empty()
                    .with_input(FieldType::Id, "9")
                    .with_input(FieldType::Price, "9")
                    .with_input(FieldType::Quantity, "9")
                    .with_input(FieldType::Id, &input)
                    .with_input(FieldType::Price, &input)
                    .with_input(FieldType::Quantity, &input);
                prop_assert!(product.id().is_unset());
                prop_assert_eq!(product.price(), 0);
                prop_assert_eq!(product.store_quantity(), 0);
            }

            /// Property: text without a scheme is never kept as the image.
            #[test]
            fn malformed_urls_use_default(input in "[a-z ]{1,30}") {
                let mut product = Product::empty();
                product.set_image(&input);
                prop_assert_eq!(product.image(), DEFAULT_IMAGE);
            }

            /// Property: well-formed URLs are kept exactly as given.
            #[test]
            fn valid_urls_are_kept(host in "[a-z]{1,12}", path in "[a-z0-9_]{0,12}") {
                let url = format!("https://{host}.com/{path}");
                let mut product = Product::empty();
                product.set_image(&url);
                prop_assert_eq!(product.image(), url.as_str());
            }
        }
    }
}
