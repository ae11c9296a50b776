//! Catalog loading for the shell.
//!
//! Products come from a YAML file when `BAZAAR_CATALOG_PATH` is set, and
//! from the built-in sample catalog otherwise.

use std::path::{Path, PathBuf};

use bazaar_core::catalog::validate_products;
use bazaar_core::{CatalogError, CatalogProvider, Product, SampleCatalog};
use tracing::debug;

/// Products read from a YAML list on disk.
#[derive(Debug, Clone)]
pub struct YamlCatalog {
    path: PathBuf,
}

impl YamlCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a YAML product list and check catalog invariants.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Unavailable` if the document doesn't parse, or
    /// the first invariant violation.
    pub fn parse(source: &str) -> Result<Vec<Product>, CatalogError> {
        let products: Vec<Product> = serde_yaml::from_str(source)
            .map_err(|e| CatalogError::Unavailable(format!("Invalid catalog YAML: {e}")))?;
        validate_products(&products)?;
        Ok(products)
    }
}

impl CatalogProvider for YamlCatalog {
    fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let source = std::fs::read_to_string(&self.path).map_err(|e| {
            CatalogError::Unavailable(format!("{}: {e}", self.path.display()))
        })?;
        let products = Self::parse(&source)?;
        debug!(path = %self.path.display(), count = products.len(), "Loaded catalog");
        Ok(products)
    }
}

/// Load the configured catalog.
///
/// # Errors
///
/// Returns an error if the YAML catalog can't be read or is invalid.
pub fn load(path: Option<&Path>) -> Result<Vec<Product>, CatalogError> {
    match path {
        Some(path) => YamlCatalog::new(path).products(),
        None => SampleCatalog.products(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
- id: "a1"
  name: "Desk Lamp"
  brand: "Lumen"
  price: "19.50"
  rating: 4.1
  reviewCount: 12
  seller: "Lumen Store"
  inStock: true
  category: "Home"
  sellerType: "third-party"
  condition: "new"
  shippingTags: ["free"]
- id: "a2"
  name: "Floor Lamp"
  brand: "Lumen"
  price: "64.00"
  originalPrice: "80.00"
  rating: 3.8
  inStock: false
  category: "Home"
"#;

    #[test]
    fn test_parse_yaml_catalog() {
        let products = YamlCatalog::parse(CATALOG).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Desk Lamp");
        assert_eq!(products[0].shipping_tags, vec!["free".to_owned()]);
        assert!(!products[1].in_stock);
        assert_eq!(products[1].discount_percent(), 20);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let doubled = CATALOG.replace("\"a2\"", "\"a1\"");
        let err = YamlCatalog::parse(&doubled).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }

    #[test]
    fn test_malformed_yaml_is_unavailable() {
        let err = YamlCatalog::parse("- id: [unclosed").unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load(Some(Path::new("/definitely/not/here.yaml"))).unwrap_err();
        assert!(matches!(err, CatalogError::Unavailable(_)));
    }

    #[test]
    fn test_default_is_sample_catalog() {
        assert_eq!(load(None).unwrap(), SampleCatalog::sample_products());
    }
}
