//! Branch order builder: the product-selection side of ordering.
//!
//! The builder keeps a session-local copy of the catalog annotated with the
//! operator's desired quantity and observed stock per product. Selected
//! products become [`CartLine`]s, which are handed to
//! [`DraftManager::hydrate`](crate::draft::DraftManager::hydrate) when the
//! operator moves on to the cart.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::checkout::{CatalogSource, GatewayError};
use crate::domain::{Category, Product};
use crate::draft::{CartLine, OrderDraftStore, StoreError};

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Unknown product: {0}")]
    UnknownProduct(String),
    #[error("Record an in-stock count for {0} before adding it to the cart")]
    StockNotRecorded(String),
    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] GatewayError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A catalog product plus the operator's annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductEntry {
    pub product: Product,
    pub desired_quantity: u32,
    pub observed_stock: Option<u32>,
}

impl ProductEntry {
    fn new(product: Product) -> Self {
        Self {
            product,
            desired_quantity: 0,
            observed_stock: None,
        }
    }

    fn to_line(&self) -> CartLine {
        CartLine {
            product_id: self.product.id.clone(),
            name: self.product.name.clone(),
            price: self.product.price,
            quantity: self.desired_quantity,
            observed_stock: self.observed_stock,
        }
    }
}

/// Which products are listed. Category, search and favourites are mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProductFilter {
    #[default]
    All,
    Category(String),
    Search(String),
    Favourites,
}

pub struct BranchOrderBuilder {
    entries: IndexMap<String, ProductEntry>,
    categories: Vec<Category>,
    filter: ProductFilter,
    selection: IndexMap<String, CartLine>,
    favourites: BTreeSet<String>,
    store: OrderDraftStore,
}

impl BranchOrderBuilder {
    /// Builds from an already fetched catalog and restores favourites.
    pub fn new(
        products: Vec<Product>,
        categories: Vec<Category>,
        store: OrderDraftStore,
    ) -> Result<Self, BuilderError> {
        let favourites = store.load_favourites()?;
        let entries = products
            .into_iter()
            .map(|p| (p.id.clone(), ProductEntry::new(p)))
            .collect();
        Ok(Self {
            entries,
            categories,
            filter: ProductFilter::All,
            selection: IndexMap::new(),
            favourites,
            store,
        })
    }

    /// Fetches products and categories from `catalog`.
    #[instrument(skip(catalog, store))]
    pub async fn load<C: CatalogSource + ?Sized>(
        catalog: &C,
        store: OrderDraftStore,
    ) -> Result<Self, BuilderError> {
        let products = catalog.fetch_products().await?;
        let categories = catalog.fetch_categories().await?;
        info!(products = products.len(), categories = categories.len(), "Catalog loaded");
        Self::new(products, categories, store)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    pub fn select_category(&mut self, name: impl Into<String>) {
        self.filter = ProductFilter::Category(name.into());
    }

    /// An empty search lists everything.
    pub fn search(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.filter = if text.trim().is_empty() {
            ProductFilter::All
        } else {
            ProductFilter::Search(text)
        };
    }

    pub fn show_favourites(&mut self) {
        self.filter = ProductFilter::Favourites;
    }

    pub fn clear_filter(&mut self) {
        self.filter = ProductFilter::All;
    }

    /// Active products matching the current filter, favourites first.
    pub fn visible_products(&self) -> Vec<&ProductEntry> {
        let needle = match &self.filter {
            ProductFilter::Search(text) => Some(text.trim().to_lowercase()),
            _ => None,
        };
        let (mut starred, rest): (Vec<&ProductEntry>, Vec<&ProductEntry>) = self
            .entries
            .values()
            .filter(|entry| entry.product.active)
            .filter(|entry| match &self.filter {
                ProductFilter::All => true,
                ProductFilter::Category(name) => &entry.product.category == name,
                ProductFilter::Search(_) => needle
                    .as_deref()
                    .map_or(true, |n| entry.product.name.to_lowercase().contains(n)),
                ProductFilter::Favourites => self.favourites.contains(&entry.product.id),
            })
            .partition(|entry| self.favourites.contains(&entry.product.id));
        starred.extend(rest);
        starred
    }

    pub fn entry(&self, product_id: &str) -> Option<&ProductEntry> {
        self.entries.get(product_id)
    }

    /// Negative quantities are clamped to zero. A selected product's cart
    /// line follows the edit.
    pub fn set_desired_quantity(&mut self, product_id: &str, quantity: i64) -> Result<u32, BuilderError> {
        let quantity = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        self.entry_mut(product_id)?.desired_quantity = quantity;
        if let Some(line) = self.selection.get_mut(product_id) {
            line.quantity = quantity;
        }
        Ok(quantity)
    }

    /// `None` means the count has not been entered; `Some(0)` is a real count.
    /// Clearing the count takes the product back out of the cart.
    pub fn set_observed_stock(&mut self, product_id: &str, value: Option<u32>) -> Result<(), BuilderError> {
        self.entry_mut(product_id)?.observed_stock = value;
        match value {
            Some(count) => {
                if let Some(line) = self.selection.get_mut(product_id) {
                    line.observed_stock = Some(count);
                }
            }
            None => {
                if self.selection.shift_remove(product_id).is_some() {
                    debug!(product_id, "Stock count cleared, removed from cart");
                }
            }
        }
        Ok(())
    }

    /// Whether the "add to cart" control is enabled for the product.
    pub fn can_add_to_cart(&self, product_id: &str) -> bool {
        self.entries
            .get(product_id)
            .is_some_and(|entry| entry.observed_stock.is_some())
    }

    /// Adds the product with its current quantity and stock count, or removes
    /// it if already selected. Returns whether it is now selected.
    #[instrument(skip(self))]
    pub fn toggle_in_cart(&mut self, product_id: &str) -> Result<bool, BuilderError> {
        if self.selection.shift_remove(product_id).is_some() {
            debug!("Removed from cart");
            return Ok(false);
        }
        let entry = self
            .entries
            .get(product_id)
            .ok_or_else(|| BuilderError::UnknownProduct(product_id.to_string()))?;
        if entry.observed_stock.is_none() {
            return Err(BuilderError::StockNotRecorded(entry.product.name.clone()));
        }
        self.selection.insert(product_id.to_string(), entry.to_line());
        debug!(quantity = entry.desired_quantity, "Added to cart");
        Ok(true)
    }

    pub fn is_selected(&self, product_id: &str) -> bool {
        self.selection.contains_key(product_id)
    }

    /// Selected lines in the order they were added.
    pub fn selection(&self) -> Vec<CartLine> {
        self.selection.values().cloned().collect()
    }

    pub fn is_favourite(&self, product_id: &str) -> bool {
        self.favourites.contains(product_id)
    }

    /// Stars or un-stars a product and persists the set straight away.
    #[instrument(skip(self))]
    pub fn toggle_favourite(&mut self, product_id: &str) -> Result<bool, BuilderError> {
        if !self.entries.contains_key(product_id) {
            return Err(BuilderError::UnknownProduct(product_id.to_string()));
        }
        let starred = if self.favourites.remove(product_id) {
            false
        } else {
            self.favourites.insert(product_id.to_string());
            true
        };
        self.store.save_favourites(&self.favourites)?;
        Ok(starred)
    }

    fn entry_mut(&mut self, product_id: &str) -> Result<&mut ProductEntry, BuilderError> {
        self.entries
            .get_mut(product_id)
            .ok_or_else(|| BuilderError::UnknownProduct(product_id.to_string()))
    }
}
