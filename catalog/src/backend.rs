use async_trait::async_trait;

use crate::bounds::Bounds;
use crate::error::Result;
use crate::filter::RangeQuery;
use crate::listing::CatalogSnapshot;
use crate::listing::Listing;
use crate::listing::ListingDraft;
use crate::reconcile::RecordCategory;
use crate::taxonomy::Category;

/// Requested slice of a server-side result list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn first(size: usize) -> Self {
        Self { page: 0, size }
    }
}

/// The remote catalog service as seen by the engine.
///
/// Implementations report failures as [`crate::CatalogError::Unavailable`]
/// or [`crate::CatalogError::Rejected`], carrying the service's message
/// when it sent one.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// The full, categorized dataset.
    async fn list_all(&self) -> Result<CatalogSnapshot>;

    /// Numeric envelopes for one category.
    async fn bounds(&self, category: Category) -> Result<Bounds>;

    async fn search_by_keyword(&self, keyword: &str, page: PageRequest) -> Result<Vec<Listing>>;

    async fn search_by_category(&self, category: Category, page: PageRequest)
    -> Result<Vec<Listing>>;

    async fn filter(
        &self,
        category: Category,
        ranges: &RangeQuery,
        page: PageRequest,
    ) -> Result<Vec<Listing>>;

    /// Deletes `id` from `target`. An unknown target is still sent so the
    /// service can answer it.
    async fn delete_listing(&self, target: RecordCategory, id: &str) -> Result<()>;

    async fn create_listing(&self, category: Category, draft: &ListingDraft) -> Result<Listing>;
}
