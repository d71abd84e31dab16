//! Code-based product categories.
//!
//! A product's category is never stored; it is looked up from its code through a
//! [`CategoryTable`] of prefix rules. The longest matching prefix wins.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockctl_core::ValueObject;

use crate::product::Product;

/// Closed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Beans,
    Nuts,
    Flour,
    Pasta,
    Rice,
    Grains,
    Fruit,
    Chocolate,
    /// Code matched no rule in the table.
    Uncategorized,
}

impl ValueObject for CategoryTag {}

impl CategoryTag {
    /// The categories the shop offers, in menu order.
    pub const ALL: [CategoryTag; 8] = [
        CategoryTag::Beans,
        CategoryTag::Nuts,
        CategoryTag::Flour,
        CategoryTag::Pasta,
        CategoryTag::Rice,
        CategoryTag::Grains,
        CategoryTag::Fruit,
        CategoryTag::Chocolate,
    ];

    /// Lowercase key used by the shell's category toggle.
    pub fn key(self) -> &'static str {
        match self {
            CategoryTag::Beans => "beans",
            CategoryTag::Nuts => "nuts",
            CategoryTag::Flour => "flour",
            CategoryTag::Pasta => "pasta",
            CategoryTag::Rice => "rice",
            CategoryTag::Grains => "grains",
            CategoryTag::Fruit => "fruit",
            CategoryTag::Chocolate => "chocolate",
            CategoryTag::Uncategorized => "uncategorized",
        }
    }
}

impl core::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0:?}")]
pub struct UnknownCategory(pub String);

impl core::str::FromStr for CategoryTag {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Which products a catalog view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryTag),
}

impl CategoryFilter {
    pub fn matches(self, tag: CategoryTag) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == tag,
        }
    }
}

impl core::str::FromStr for CategoryFilter {
    type Err = UnknownCategory;

    /// Accepts `"all"` or any category key (`"beans"`, `"nuts"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

/// Codes starting with `prefix` belong to `category`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub prefix: String,
    pub category: CategoryTag,
}

impl CategoryRule {
    pub fn new(prefix: impl Into<String>, category: CategoryTag) -> Self {
        Self {
            prefix: prefix.into(),
            category,
        }
    }
}

/// Prefix table mapping product codes to categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    rules: Vec<CategoryRule>,
}

impl ValueObject for CategoryTable {}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new(vec![
            CategoryRule::new("00", CategoryTag::Beans),
            CategoryRule::new("10", CategoryTag::Nuts),
            CategoryRule::new("20", CategoryTag::Flour),
            CategoryRule::new("30", CategoryTag::Pasta),
            CategoryRule::new("31", CategoryTag::Rice),
            CategoryRule::new("32", CategoryTag::Grains),
            CategoryRule::new("40", CategoryTag::Fruit),
            CategoryRule::new("50", CategoryTag::Chocolate),
        ])
    }
}

impl CategoryTable {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Shared instance of the default table.
    pub fn standard() -> &'static CategoryTable {
        static STANDARD: OnceLock<CategoryTable> = OnceLock::new();
        STANDARD.get_or_init(CategoryTable::default)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// Longest matching prefix wins; among equal lengths the earlier rule wins.
    pub fn category_of(&self, code: &str) -> CategoryTag {
        let mut best: Option<&CategoryRule> = None;
        for rule in &self.rules {
            if !code.starts_with(rule.prefix.as_str()) {
                continue;
            }
            if best.is_none_or(|b| rule.prefix.len() > b.prefix.len()) {
                best = Some(rule);
            }
        }
        best.map_or(CategoryTag::Uncategorized, |rule| rule.category)
    }

    /// Lazily keeps the products in `tag`, preserving their order.
    pub fn filter<'a, I>(&'a self, products: I, tag: CategoryTag) -> impl Iterator<Item = &'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        products
            .into_iter()
            .filter(move |product| self.category_of(product.code()) == tag)
    }
}

/// Category of `code` under the standard table.
pub fn category_of(code: &str) -> CategoryTag {
    CategoryTable::standard().category_of(code)
}

/// Products in `tag` under the standard table, in their original order.
pub fn filter_by_category<'a, I>(products: I, tag: CategoryTag) -> impl Iterator<Item = &'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    CategoryTable::standard().filter(products, tag)
}
