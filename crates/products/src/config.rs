use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::category::{CategoryRule, CategoryTable};
use crate::validation::{FieldLimits, Validator};

const CONFIG_FILE: &str = "config/stock-control";
const ENV_PREFIX: &str = "STOCK_CONTROL";

/// Catalog settings: field length limits and an optional category table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StockControlConfig {
    pub limits: FieldLimits,
    /// Replaces the standard category table when set.
    pub categories: Option<Vec<CategoryRule>>,
}

impl StockControlConfig {
    /// Load from `config/stock-control.toml` (optional), then `STOCK_CONTROL__*` env vars.
    ///
    /// e.g. `STOCK_CONTROL__LIMITS__NAME=80`.
    pub fn load() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        let loaded = Self::from_builder(builder)?;
        tracing::debug!(limits = ?loaded.limits, custom_categories = loaded.categories.is_some(), "loaded stock control config");
        Ok(loaded)
    }

    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Self::from_builder(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder.build()?.try_deserialize()
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.limits)
    }

    pub fn category_table(&self) -> CategoryTable {
        match &self.categories {
            Some(rules) => CategoryTable::new(rules.clone()),
            None => CategoryTable::default(),
        }
    }
}
