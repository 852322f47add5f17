use alloc::string::ToString;
use alloc::vec::Vec;

use super::Product;
use crate::{CatalogError, CatalogResult};

/// Anything that can answer a free-text product search.
pub trait SearchApi {
    fn search(&self, query: &str) -> Vec<Product>;
}

/// Mocked product API backed by an in-memory list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    const BUILTIN_JSON: &'static str = include_str!("products.json");

    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json)
            .map(Self::new)
            .map_err(|err| CatalogError::InvalidCatalog(err.to_string()))
    }

    /// The product list shipped with the demo.
    pub fn builtin() -> CatalogResult<Self> {
        Self::from_json(Self::BUILTIN_JSON)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl SearchApi for Catalog {
    /// Case-insensitive substring match on title or description, in catalog order.
    fn search(&self, query: &str) -> Vec<Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.clone();
        }
        self.products
            .iter()
            .filter(|product| product.matches(&needle))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(!catalog.products().is_empty());
        assert!(catalog.products().iter().all(|p| p.price >= 0.0));
    }

    #[test]
    fn empty_query_returns_everything() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.search("").len(), catalog.products().len());
        assert_eq!(catalog.search("   ").len(), catalog.products().len());
    }

    #[test]
    fn search_matches_title_or_description_ignoring_case() {
        let catalog = Catalog::builtin().unwrap();

        let found = catalog.search("TV");
        assert!(!found.is_empty());
        assert!(found.iter().all(|p| {
            p.title.to_lowercase().contains("tv") || p.description.to_lowercase().contains("tv")
        }));
        // "Antena digital" only mentions TV in its description
        assert!(found.iter().any(|p| p.title == "Antena digital"));
    }

    #[test]
    fn search_without_matches_is_empty() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.search("heladera").is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            Catalog::from_json("{\"id\": 1}"),
            Err(CatalogError::InvalidCatalog(_))
        ));
    }
}
