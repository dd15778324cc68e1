//! Catalog handlers.

mod fetch_all;

pub use fetch_all::{CatalogFetch, CatalogPager, MAX_PAGES};
