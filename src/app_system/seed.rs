//! Startup catalog seeding.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::branch_actor::BranchError;
use crate::category_actor::CategoryError;
use crate::domain::{BranchCreate, CategoryCreate, ProductCreate};
use crate::product_actor::ProductError;

/// Catalog records loaded into the actors before the server starts.
///
/// ```json
/// { "categories": [{ "name": "Bread" }],
///   "branches": [{ "name": "Main", "address": "1 High St" }],
///   "products": [{ "name": "Rye Loaf", "price": 90, "category": "Bread" }] }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub categories: Vec<CategoryCreate>,
    #[serde(default)]
    pub branches: Vec<BranchCreate>,
    #[serde(default)]
    pub products: Vec<ProductCreate>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Cannot read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error(transparent)]
    Branch(#[from] BranchError),
    #[error(transparent)]
    Product(#[from] ProductError),
}

impl CatalogSeed {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn len(&self) -> usize {
        self.categories.len() + self.branches.len() + self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_sections_default_to_empty() {
        let seed = CatalogSeed::from_json(r#"{ "branches": [{ "name": "Main" }] }"#).unwrap();
        assert_eq!(seed.branches[0].name, "Main");
        assert_eq!(seed.branches[0].address, "");
        assert!(seed.products.is_empty());
        assert_eq!(seed.len(), 1);
    }

    #[test]
    fn products_default_to_active() {
        let seed = CatalogSeed::from_json(
            r#"{ "products": [{ "name": "Rye Loaf", "price": 90, "category": "Bread" }] }"#,
        )
        .unwrap();
        assert!(seed.products[0].active);
    }

    #[test]
    fn reads_from_file_and_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "categories": [{{ "name": "Bread" }}] }}"#).unwrap();
        let seed = CatalogSeed::from_file(file.path()).unwrap();
        assert_eq!(seed.categories[0].name, "Bread");

        assert!(matches!(CatalogSeed::from_json("[1, 2"), Err(SeedError::Parse(_))));
        assert!(matches!(
            CatalogSeed::from_file("/nonexistent/seed.json"),
            Err(SeedError::Io(_))
        ));
    }
}
