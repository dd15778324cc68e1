//! CatalogPager - drains a paginated catalog source completely.
//!
//! The reconciler needs random access by identifier, so the pager
//! materializes the full entry set rather than streaming it.

use std::sync::Arc;

use crate::domain::catalog::{CatalogEntry, CatalogFilter, CatalogKind};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CatalogSource;

/// Hard safety bound on page fetches, so an upstream that keeps reporting
/// `has_next` can never hang the caller.
pub const MAX_PAGES: u32 = 100;

/// A fully drained catalog listing.
///
/// `overrun` carries the non-fatal `PaginationOverrun` warning when the
/// page cap was hit; the accumulated entries are still usable.
#[derive(Debug, Clone)]
pub struct CatalogFetch {
    pub entries: Vec<CatalogEntry>,
    pub overrun: Option<DomainError>,
}

/// Drains a paginated catalog source with a fixed page size.
pub struct CatalogPager {
    source: Arc<dyn CatalogSource>,
    page_size: u32,
}

impl CatalogPager {
    pub fn new(source: Arc<dyn CatalogSource>, page_size: u32) -> Self {
        Self { source, page_size }
    }

    /// Fetches every page of the given catalog collection.
    ///
    /// Continues while the source reports `has_next` AND the last page was
    /// full; a short page ends the drain even if the flag says otherwise,
    /// since upstream flags have proven unreliable. Stops unconditionally
    /// after `MAX_PAGES` pages with a logged `PaginationOverrun` warning.
    pub async fn fetch_all(
        &self,
        kind: CatalogKind,
        filter: &CatalogFilter,
    ) -> Result<CatalogFetch, DomainError> {
        let mut entries = Vec::new();
        let mut page = 1u32;
        let mut overrun = None;

        loop {
            let fetched = self.source.list(kind, filter, page, self.page_size).await?;
            let count = fetched.items.len();
            entries.extend(fetched.items);

            let full_page = count == self.page_size as usize;
            if !(fetched.has_next && full_page) {
                break;
            }

            if page >= MAX_PAGES {
                tracing::warn!(
                    kind = kind.as_str(),
                    pages = page,
                    accumulated = entries.len(),
                    "catalog pagination exceeded the page cap, stopping"
                );
                overrun = Some(
                    DomainError::new(
                        ErrorCode::PaginationOverrun,
                        format!("Catalog listing stopped after {} pages", MAX_PAGES),
                    )
                    .with_detail("kind", kind.as_str()),
                );
                break;
            }
            page += 1;
        }

        Ok(CatalogFetch { entries, overrun })
    }
}
