//! Catalog source port (read side).

use async_trait::async_trait;

use crate::domain::catalog::{CatalogEntry, CatalogFilter, CatalogKind};
use crate::domain::foundation::DomainError;

/// One page of a catalog listing.
///
/// `has_next` comes from an upstream flag that has been observed to be
/// unreliable; the pager treats a short page as final regardless.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<CatalogEntry>,
    pub has_next: bool,
}

/// Paginated access to customer and product catalogs.
///
/// Pages are 1-based. Implementations must not block; the pager drains
/// them serially.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Lists one page of the given catalog collection.
    ///
    /// # Errors
    ///
    /// - `ApiError` on transport or decoding failure
    async fn list(
        &self,
        kind: CatalogKind,
        filter: &CatalogFilter,
        page: u32,
        page_size: u32,
    ) -> Result<CatalogPage, DomainError>;
}
