//! In-memory catalog source.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::catalog::{CatalogEntry, CatalogFilter, CatalogKind, Customer, Product};
use crate::domain::foundation::DomainError;
use crate::ports::{CatalogPage, CatalogSource};

/// In-memory implementation of [`CatalogSource`].
///
/// Serves every product regardless of the filter's `customer_id`;
/// per-customer assortments are a backend concern this adapter does not
/// model. Search and active-only filtering behave like the real endpoint.
#[derive(Debug, Default)]
pub struct InMemoryCatalogSource {
    customers: RwLock<Vec<Customer>>,
    products: RwLock<Vec<Product>>,
    always_has_next: AtomicBool,
}

impl InMemoryCatalogSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces `has_next: true` on every page, mimicking the upstream bug
    /// the pagination cap defends against.
    pub fn report_endless_pages(&self) {
        self.always_has_next.store(true, Ordering::Relaxed);
    }

    pub fn add_customer(&self, customer: Customer) {
        self.customers
            .write()
            .expect("lock poisoned")
            .push(customer);
    }

    pub fn add_product(&self, product: Product) {
        self.products.write().expect("lock poisoned").push(product);
    }

    fn filtered(&self, kind: CatalogKind, filter: &CatalogFilter) -> Vec<CatalogEntry> {
        let needle = filter.search.as_deref().map(str::to_lowercase);
        let matches = |name: &str, active: bool| {
            (!filter.active_only || active)
                && needle
                    .as_deref()
                    .map_or(true, |n| name.to_lowercase().contains(n))
        };

        match kind {
            CatalogKind::Customers => self
                .customers
                .read()
                .expect("lock poisoned")
                .iter()
                .filter(|c| matches(&c.name, c.active))
                .cloned()
                .map(CatalogEntry::Customer)
                .collect(),
            CatalogKind::Products => self
                .products
                .read()
                .expect("lock poisoned")
                .iter()
                .filter(|p| matches(&p.name, p.active))
                .cloned()
                .map(CatalogEntry::Product)
                .collect(),
        }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn list(
        &self,
        kind: CatalogKind,
        filter: &CatalogFilter,
        page: u32,
        page_size: u32,
    ) -> Result<CatalogPage, DomainError> {
        let all = self.filtered(kind, filter);
        let start = (page.saturating_sub(1) as usize).saturating_mul(page_size as usize);

        if self.always_has_next.load(Ordering::Relaxed) && !all.is_empty() {
            // Serve full pages forever by wrapping around the data.
            let items = (start..start + page_size as usize)
                .map(|i| all[i % all.len()].clone())
                .collect();
            return Ok(CatalogPage {
                items,
                has_next: true,
            });
        }

        let end = (start + page_size as usize).min(all.len());
        let items = if start < all.len() {
            all[start..end].to_vec()
        } else {
            Vec::new()
        };
        let has_next = end < all.len();

        Ok(CatalogPage { items, has_next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CustomerId, ProductId, SalesRepId};

    fn source_with_products(n: usize) -> InMemoryCatalogSource {
        let source = InMemoryCatalogSource::new();
        for i in 0..n {
            source.add_product(Product {
                id: ProductId::new(),
                name: format!("Product {i}"),
                active: true,
                default_unit_price: None,
            });
        }
        source
    }

    #[tokio::test]
    async fn pages_are_one_based_with_a_correct_has_next() {
        let source = source_with_products(5);
        let filter = CatalogFilter::default();

        let first = source
            .list(CatalogKind::Products, &filter, 1, 2)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_next);

        let last = source
            .list(CatalogKind::Products, &filter, 3, 2)
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert!(!last.has_next);

        let beyond = source
            .list(CatalogKind::Products, &filter, 4, 2)
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert!(!beyond.has_next);
    }

    #[tokio::test]
    async fn endless_mode_serves_full_pages_forever() {
        let source = source_with_products(3);
        source.report_endless_pages();
        let filter = CatalogFilter::default();

        let page = source
            .list(CatalogKind::Products, &filter, 500, 2)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.has_next);
    }

    #[tokio::test]
    async fn active_only_and_search_filter_entries() {
        let source = InMemoryCatalogSource::new();
        source.add_customer(Customer {
            id: CustomerId::new(),
            name: "Acme Foods".to_string(),
            active: true,
            sales_rep: SalesRepId::new("rep-1").unwrap(),
        });
        source.add_customer(Customer {
            id: CustomerId::new(),
            name: "Acme Retired".to_string(),
            active: false,
            sales_rep: SalesRepId::new("rep-1").unwrap(),
        });

        let filter = CatalogFilter {
            customer_id: None,
            active_only: true,
            search: Some("acme".to_string()),
        };
        let page = source
            .list(CatalogKind::Customers, &filter, 1, 10)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].as_customer().unwrap().name, "Acme Foods");
    }
}
