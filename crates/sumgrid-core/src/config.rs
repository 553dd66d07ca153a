//! Sheet configuration.
//!
//! Loaded from TOML, every key optional:
//!
//! ```toml
//! precision = 1
//! max_depth = 256
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::error::Result;

/// Default number of decimal places for rendered numbers.
pub const DEFAULT_PRECISION: usize = 1;

/// Default nesting limit for lazy evaluation of pending formulas.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    /// Decimal places used when a formula result is displayed.
    pub precision: usize,
    /// How deep evaluation may recurse into not-yet-evaluated formulas.
    pub max_depth: usize,
}

impl SheetConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str::<SheetConfig>(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            precision: DEFAULT_PRECISION,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
