//! Catalog entries - customers and products supplied by the backend.
//!
//! Catalog data is read-only to this crate: it is refreshed per cycle or
//! customer selection and reconciled against forecast records, never
//! mutated locally.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{CustomerId, ProductId, SalesRepId};

/// A customer owned by a sales representative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub active: bool,
    pub sales_rep: SalesRepId,
}

/// A sellable product with an optional default unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub active: bool,
    pub default_unit_price: Option<f64>,
}

/// A single catalog entry as returned by the paginated listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CatalogEntry {
    Customer(Customer),
    Product(Product),
}

impl CatalogEntry {
    /// Returns the entry as a customer, if it is one.
    pub fn as_customer(&self) -> Option<&Customer> {
        match self {
            CatalogEntry::Customer(c) => Some(c),
            CatalogEntry::Product(_) => None,
        }
    }

    /// Returns the entry as a product, if it is one.
    pub fn as_product(&self) -> Option<&Product> {
        match self {
            CatalogEntry::Product(p) => Some(p),
            CatalogEntry::Customer(_) => None,
        }
    }

    /// Returns true if the entry is flagged active.
    pub fn is_active(&self) -> bool {
        match self {
            CatalogEntry::Customer(c) => c.active,
            CatalogEntry::Product(p) => p.active,
        }
    }
}

/// Which catalog collection to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Customers,
    Products,
}

impl CatalogKind {
    /// Returns the wire name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogKind::Customers => "customers",
            CatalogKind::Products => "products",
        }
    }
}

/// Server-side filter for catalog listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFilter {
    /// Restrict products to those sellable to this customer.
    pub customer_id: Option<CustomerId>,
    /// Restrict to entries flagged active.
    pub active_only: bool,
    /// Free-text name search.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Filter for a customer's active products, as the grid reconciler needs.
    pub fn active_products_for(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            active_only: true,
            search: None,
        }
    }
}
