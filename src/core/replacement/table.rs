//! Replacement table
//!
//! Total mapping from [`Category`] to generic token. The compiled-in
//! baseline comes from [`Category::generic_token`]; deployments can override
//! individual tokens from a TOML document treated as versionable
//! configuration data.

use crate::domain::category::Category;
use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Token used when nothing more specific is mapped
pub const DEFAULT_TOKEN: &str = "entity";

#[derive(Debug, Deserialize)]
struct TableDocument {
    #[serde(default)]
    tokens: HashMap<String, String>,
}

/// Category-to-token lookup, total over the whole enum
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    overrides: HashMap<Category, String>,
}

impl ReplacementTable {
    /// Built-in table with no overrides
    pub fn builtin() -> Self {
        Self::default()
    }

    /// Load overrides from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            AegisError::Configuration(format!(
                "Failed to read replacement table {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse overrides from TOML content
    ///
    /// Unknown category labels are rejected so a typo cannot silently leave
    /// a category on its default token.
    pub fn from_toml(content: &str) -> Result<Self> {
        let document: TableDocument = toml::from_str(content).map_err(|e| {
            AegisError::Configuration(format!("Failed to parse replacement table TOML: {}", e))
        })?;

        let mut overrides = HashMap::with_capacity(document.tokens.len());
        for (label, token) in document.tokens {
            let category = Category::from_label(&label).ok_or_else(|| {
                AegisError::Configuration(format!(
                    "Unknown category '{}' in replacement table",
                    label
                ))
            })?;
            if token.is_empty() {
                return Err(AegisError::Configuration(format!(
                    "Empty replacement token for category '{}'",
                    label
                )));
            }
            overrides.insert(category, token);
        }

        Ok(Self { overrides })
    }

    /// Token for a category; never fails
    pub fn token_for(&self, category: Category) -> &str {
        match self.overrides.get(&category) {
            Some(token) => token.as_str(),
            None => category.generic_token(),
        }
    }

    /// Number of configured overrides
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}
