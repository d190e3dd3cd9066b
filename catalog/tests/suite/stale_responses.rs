//! Answers that arrive after the user moved on must not be applied.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use estate_catalog::Action;
use estate_catalog::Bounds;
use estate_catalog::Browser;
use estate_catalog::CatalogBackend;
use estate_catalog::CatalogSnapshot;
use estate_catalog::Category;
use estate_catalog::Listing;
use estate_catalog::ListingDraft;
use estate_catalog::ModeKind;
use estate_catalog::Ownership;
use estate_catalog::PageRequest;
use estate_catalog::PropertyGroup;
use estate_catalog::PropertyType;
use estate_catalog::RangeField;
use estate_catalog::RangeQuery;
use estate_catalog::RecordCategory;
use estate_catalog::Result;
use estate_catalog::Session;
use estate_catalog::SessionConfig;
use estate_catalog::SnapshotBackend;
use pretty_assertions::assert_eq;
use tokio::sync::Mutex;
use tokio::sync::oneshot;

use super::catalog;

const SALE_APARTMENT: Category = Category::new(Ownership::Sale, PropertyType::Apartment);
const SALE_OFFICE: Category = Category::new(Ownership::Sale, PropertyType::Office);

/// Delegates to a [`SnapshotBackend`] but holds selected calls until the
/// test opens their gate.
struct GatedBackend {
    inner: SnapshotBackend,
    bounds_gates: Mutex<HashMap<Category, oneshot::Receiver<()>>>,
    search_gate: Mutex<Option<oneshot::Receiver<()>>>,
}

impl GatedBackend {
    fn new() -> Self {
        Self {
            inner: SnapshotBackend::new(catalog()),
            bounds_gates: Mutex::new(HashMap::new()),
            search_gate: Mutex::new(None),
        }
    }

    async fn gate_bounds(&self, category: Category) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.bounds_gates.lock().await.insert(category, rx);
        tx
    }

    async fn gate_search(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.search_gate.lock().await = Some(rx);
        tx
    }
}

#[async_trait]
impl CatalogBackend for GatedBackend {
    async fn list_all(&self) -> Result<CatalogSnapshot> {
        self.inner.list_all().await
    }

    async fn bounds(&self, category: Category) -> Result<Bounds> {
        let gate = self.bounds_gates.lock().await.remove(&category);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.bounds(category).await
    }

    async fn search_by_keyword(&self, keyword: &str, page: PageRequest) -> Result<Vec<Listing>> {
        self.inner.search_by_keyword(keyword, page).await
    }

    async fn search_by_category(
        &self,
        category: Category,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let gate = self.search_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.inner.search_by_category(category, page).await
    }

    async fn filter(
        &self,
        category: Category,
        ranges: &RangeQuery,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        self.inner.filter(category, ranges, page).await
    }

    async fn delete_listing(&self, target: RecordCategory, id: &str) -> Result<()> {
        self.inner.delete_listing(target, id).await
    }

    async fn create_listing(&self, category: Category, draft: &ListingDraft) -> Result<Listing> {
        self.inner.create_listing(category, draft).await
    }
}

fn browser(backend: Arc<GatedBackend>) -> Browser {
    let session = Session::new(SessionConfig::default()).expect("valid config");
    Browser::start(session, backend)
}

#[tokio::test]
async fn late_bounds_for_previous_category_are_dropped() {
    let backend = Arc::new(GatedBackend::new());
    let release = backend.gate_bounds(SALE_APARTMENT).await;
    let mut browser = browser(backend.clone());

    browser.dispatch(Action::SelectGroup(PropertyGroup::Commercial));
    assert_eq!(browser.in_flight(), 3);
    // Catalog load and office bounds; apartment bounds are still held.
    assert!(browser.step().await);
    assert!(browser.step().await);
    assert_eq!(browser.in_flight(), 1);

    release.send(()).expect("gate open");
    browser.settle().await;

    let session = browser.session();
    assert_eq!(session.category(), SALE_OFFICE);
    assert!(session.bounds().is_some());
    let area = session.filters().get(RangeField::Area).expect("seeded");
    assert_eq!((area.lo.as_str(), area.hi.as_str()), ("80", "240"));
    assert_eq!(session.filters().get(RangeField::FloorCount), None);
}

#[tokio::test]
async fn slow_search_does_not_overwrite_newer_filter() {
    let backend = Arc::new(GatedBackend::new());
    let mut browser = browser(backend.clone());
    browser.settle().await;

    let release = backend.gate_search().await;
    browser.dispatch(Action::Search);
    browser.dispatch(Action::ApplyFilters);
    assert!(browser.step().await);
    assert_eq!(browser.session().mode().kind(), ModeKind::Filter);

    release.send(()).expect("gate open");
    browser.settle().await;
    assert_eq!(browser.session().mode().kind(), ModeKind::Filter);
    assert!(browser.take_notices().is_empty());
}
