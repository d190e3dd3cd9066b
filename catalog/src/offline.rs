//! In-memory [`CatalogBackend`] over a snapshot file, answering the way the
//! catalog service does.

use std::num::NonZeroUsize;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::backend::CatalogBackend;
use crate::backend::PageRequest;
use crate::bounds::Bounds;
use crate::bounds::StatsReport;
use crate::error::CatalogError;
use crate::error::Result;
use crate::filter::RangeQuery;
use crate::keyword::listing_text;
use crate::keyword::normalize_keyword;
use crate::listing::CatalogSnapshot;
use crate::listing::Listing;
use crate::listing::ListingDraft;
use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::paginate::paginate;
use crate::reconcile::RecordCategory;
use crate::taxonomy::Category;

pub struct SnapshotBackend {
    snapshot: RwLock<CatalogSnapshot>,
}

impl SnapshotBackend {
    pub fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    /// A copy of the current dataset, including local deletes and creates.
    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.snapshot.read().await.clone()
    }
}

/// The service's paging: a zero size means the default of five.
fn server_page(items: Vec<Listing>, page: PageRequest) -> Vec<Listing> {
    let size = NonZeroUsize::new(page.size)
        .or(NonZeroUsize::new(DEFAULT_PAGE_SIZE))
        .unwrap_or(NonZeroUsize::MIN);
    paginate(&items, page.page, size).to_vec()
}

fn not_found() -> CatalogError {
    CatalogError::Rejected {
        status: 404,
        message: None,
    }
}

#[async_trait]
impl CatalogBackend for SnapshotBackend {
    async fn list_all(&self) -> Result<CatalogSnapshot> {
        Ok(self.snapshot().await)
    }

    async fn bounds(&self, category: Category) -> Result<Bounds> {
        let snapshot = self.snapshot.read().await;
        Ok(StatsReport::from_listings(category, snapshot.bucket(category)).into_bounds(category))
    }

    async fn search_by_keyword(&self, keyword: &str, page: PageRequest) -> Result<Vec<Listing>> {
        let Some(needle) = normalize_keyword(keyword) else {
            return Ok(Vec::new());
        };
        let snapshot = self.snapshot.read().await;
        let matches = snapshot
            .entries()
            .filter(|(_, listing)| listing_text(listing).contains(&needle))
            .map(|(_, listing)| listing.clone())
            .collect();
        Ok(server_page(matches, page))
    }

    async fn search_by_category(
        &self,
        category: Category,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let snapshot = self.snapshot.read().await;
        Ok(server_page(snapshot.bucket(category).to_vec(), page))
    }

    async fn filter(
        &self,
        category: Category,
        ranges: &RangeQuery,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let snapshot = self.snapshot.read().await;
        let matches = snapshot
            .bucket(category)
            .iter()
            .filter(|listing| ranges.matches(listing))
            .cloned()
            .collect();
        Ok(server_page(matches, page))
    }

    async fn delete_listing(&self, target: RecordCategory, id: &str) -> Result<()> {
        let Some(category) = target.known() else {
            debug!("delete of {id} targets an unknown category");
            return Err(not_found());
        };
        let mut snapshot = self.snapshot.write().await;
        let bucket = snapshot.bucket_mut(category);
        let before = bucket.len();
        bucket.retain(|listing| listing.id != id);
        if bucket.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn create_listing(&self, category: Category, draft: &ListingDraft) -> Result<Listing> {
        let mut listing: Listing = serde_json::from_value(draft.payload(category))
            .map_err(|err| CatalogError::Rejected {
                status: 400,
                message: Some(err.to_string()),
            })?;
        listing.id = Uuid::new_v4().to_string();
        self.snapshot
            .write()
            .await
            .bucket_mut(category)
            .push(listing.clone());
        Ok(listing)
    }
}
