use thiserror::Error;

use stockctl_core::{DomainError, Entity, ProductId};
use stockctl_products::{
    CategoryFilter, CategoryTable, CategoryTag, FieldType, Product, StockControlConfig,
    ValidationError, Validator,
};

/// Why the catalog refused an operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The product failed validation and was not committed or updated.
    #[error("product rejected: {0}")]
    Rejected(#[from] ValidationError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StockLocation {
    Store,
    Floor,
}

impl StockLocation {
    fn as_str(self) -> &'static str {
        match self {
            StockLocation::Store => "store",
            StockLocation::Floor => "floor",
        }
    }
}

/// Ordered collection of committed products.
///
/// Products only enter through [`Catalog::commit`] and only change through the
/// update operations below, each of which keeps every quantity non-negative and
/// every product valid.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    validator: Validator,
    categories: CategoryTable,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &StockControlConfig) -> Self {
        Self {
            products: Vec::new(),
            validator: config.validator(),
            categories: config.category_table(),
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in commit order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        position_of(&self.products, id).map(|index| &self.products[index])
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn category_of(&self, product: &Product) -> CategoryTag {
        self.categories.category_of(product.code())
    }

    /// Validates `product` and appends it.
    ///
    /// An unset id is replaced with one past the highest id in the catalog.
    /// Products carrying negative stock are refused.
    pub fn commit(&mut self, mut product: Product) -> Result<ProductId, CatalogError> {
        if let Err(err) = self.validator.validate(&product) {
            tracing::warn!(field = %err.field(), error = %err, "product rejected");
            return Err(err.into());
        }
        if product.store_quantity() < 0 || product.floor_quantity() < 0 {
            tracing::warn!(
                store = product.store_quantity(),
                floor = product.floor_quantity(),
                "product rejected: negative stock"
            );
            return Err(DomainError::invariant("stock quantities cannot be negative").into());
        }

        let id = if product.id().is_unset() {
            self.next_id()?
        } else if self.contains(product.id()) {
            return Err(DomainError::conflict(format!("product {} already exists", product.id())).into());
        } else {
            product.id()
        };
        product.set_id(id);

        tracing::info!(product_id = %id, code = product.code(), name = product.name(), "product committed");
        self.products.push(product);
        Ok(id)
    }

    /// Applies form text to a committed product, re-validating before the change sticks.
    pub fn update_field(&mut self, id: ProductId, field: FieldType, input: &str) -> Result<(), CatalogError> {
        if field == FieldType::Id {
            return Err(DomainError::invariant("product id cannot be changed").into());
        }
        let index = self.index_of(id)?;
        let updated = self.products[index].clone().with_input(field, input);
        self.validator.validate(&updated)?;

        tracing::debug!(product_id = %id, field = %field, "product updated");
        self.products[index] = updated;
        Ok(())
    }

    /// Adds `delta` kilograms to the store quantity and returns the new quantity.
    pub fn adjust_store_quantity(&mut self, id: ProductId, delta: i64) -> Result<i64, CatalogError> {
        self.adjust(id, StockLocation::Store, delta)
    }

    /// Adds `delta` kilograms to the floor quantity and returns the new quantity.
    pub fn adjust_floor_quantity(&mut self, id: ProductId, delta: i64) -> Result<i64, CatalogError> {
        self.adjust(id, StockLocation::Floor, delta)
    }

    /// Moves `kilograms` of stock from the store to the shop floor.
    pub fn move_to_floor(&mut self, id: ProductId, kilograms: i64) -> Result<(), CatalogError> {
        if kilograms <= 0 {
            return Err(DomainError::validation("transfer must be a positive weight").into());
        }
        let index = self.index_of(id)?;
        let product = &mut self.products[index];
        if kilograms > product.store_quantity() {
            return Err(DomainError::invariant(format!(
                "only {} kg of product {id} in store",
                product.store_quantity()
            ))
            .into());
        }

        if product.floor_quantity().checked_add(kilograms).is_none() {
            return Err(DomainError::invariant("floor quantity would overflow").into());
        }

        product.update_store_quantity(-kilograms);
        product.update_floor_quantity(kilograms);
        tracing::debug!(product_id = %id, kilograms, "stock moved to floor");
        Ok(())
    }

    /// Products matching `filter`, in catalog order.
    pub fn view(&self, filter: CategoryFilter) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |p| filter.matches(self.categories.category_of(p.code())))
    }

    /// Products in `tag`, in catalog order.
    pub fn filter_by_category(&self, tag: CategoryTag) -> impl Iterator<Item = &Product> {
        self.categories.filter(&self.products, tag)
    }

    fn index_of(&self, id: ProductId) -> Result<usize, DomainError> {
        position_of(&self.products, id).ok_or(DomainError::not_found(id))
    }

    fn next_id(&self) -> Result<ProductId, DomainError> {
        self.products
            .iter()
            .map(Product::id)
            .max()
            .unwrap_or(ProductId::UNSET)
            .next()
            .ok_or_else(|| DomainError::invariant("product ids exhausted"))
    }

    fn adjust(&mut self, id: ProductId, location: StockLocation, delta: i64) -> Result<i64, CatalogError> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero").into());
        }
        let index = self.index_of(id)?;
        let product = &mut self.products[index];
        let current = match location {
            StockLocation::Store => product.store_quantity(),
            StockLocation::Floor => product.floor_quantity(),
        };
        let updated = match current.checked_add(delta) {
            Some(q) if q >= 0 => q,
            _ => {
                return Err(DomainError::invariant(format!(
                    "{} quantity cannot go negative",
                    location.as_str()
                ))
                .into());
            }
        };

        match location {
            StockLocation::Store => product.update_store_quantity(delta),
            StockLocation::Floor => product.update_floor_quantity(delta),
        }
        tracing::debug!(product_id = %id, location = location.as_str(), delta, quantity = updated, "stock adjusted");
        Ok(updated)
    }
}

fn position_of<E: Entity>(entities: &[E], id: E::Id) -> Option<usize> {
    entities.iter().position(|e| e.id() == id)
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = core::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}
