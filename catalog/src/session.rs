//! The browsing session as an explicit state value.
//!
//! [`Session::apply`] and [`Session::complete`] are pure: they consume the
//! session and hand back the next one together with the effects to run and an
//! optional notice. Nothing here performs I/O; see [`crate::Browser`] for the
//! driver that executes effects.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::backend::PageRequest;
use crate::bounds::Bounds;
use crate::bounds::BoundsCache;
use crate::config::SessionConfig;
use crate::effect::Action;
use crate::effect::Completion;
use crate::effect::Effect;
use crate::effect::RequestId;
use crate::error::Result;
use crate::filter::FilterState;
use crate::keyword::matches_keyword;
use crate::keyword::normalize_keyword;
use crate::listing::CatalogSnapshot;
use crate::mode::ModeKind;
use crate::mode::RetrievalMode;
use crate::mode::SearchQuery;
use crate::notice::Notice;
use crate::paginate::PAGE_SIZE_OPTIONS;
use crate::paginate::PageWindow;
use crate::reconcile::CanonicalIndex;
use crate::reconcile::ReconciledRecord;
use crate::reconcile::canonical_records;
use crate::selector::CategorySelection;
use crate::taxonomy::Category;

const BOUNDS_FAILED: &str = "Failed to load bounds";
const SEARCH_FAILED: &str = "Search failed";
const FILTER_FAILED: &str = "Filter failed";
const DELETE_FAILED: &str = "Delete failed";
const CATALOG_FAILED: &str = "Failed to load data";
const CREATE_FAILED: &str = "Create failed";

/// Result of one transition.
#[must_use]
#[derive(Debug)]
pub struct Transition {
    pub session: Session,
    pub effects: Vec<Effect>,
    pub notice: Option<Notice>,
}

impl Transition {
    fn idle(session: Session) -> Self {
        Self {
            session,
            effects: Vec::new(),
            notice: None,
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }
}

/// One page of what the user currently sees.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageView {
    pub records: Vec<ReconciledRecord>,
    pub mode: ModeKind,
    pub index: usize,
    pub size: usize,
    pub total: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    config: SessionConfig,
    selection: CategorySelection,
    bounds: BoundsCache,
    filters: FilterState,
    mode: RetrievalMode,
    keyword: String,
    page: PageWindow,
    catalog: CatalogSnapshot,
    index: CanonicalIndex,
    next_request: u64,
    latest_retrieval: Option<RequestId>,
    latest_catalog: Option<RequestId>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            page: PageWindow::new(config.page_size()),
            config,
            ..Default::default()
        })
    }

    /// Loads the catalog and the bounds of the initial category.
    pub fn start(mut self) -> Transition {
        let load = self.issue_catalog_load();
        let category = self.category();
        Transition::idle(self)
            .with_effect(load)
            .with_effect(Effect::FetchBounds { category })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selection(&self) -> &CategorySelection {
        &self.selection
    }

    pub fn category(&self) -> Category {
        self.selection.category()
    }

    /// Bounds of the current category, if they have arrived.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.for_category(self.category())
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn mode(&self) -> &RetrievalMode {
        &self.mode
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn page(&self) -> PageWindow {
        self.page
    }

    pub fn catalog(&self) -> &CatalogSnapshot {
        &self.catalog
    }

    pub fn canonical_index(&self) -> &CanonicalIndex {
        &self.index
    }

    pub fn apply(mut self, action: Action) -> Transition {
        match action {
            Action::SelectOwnership(ownership) => {
                let changed = self.selection.select_ownership(ownership);
                self.after_selection(changed)
            }
            Action::SelectGroup(group) => {
                let changed = self.selection.select_group(group);
                self.after_selection(changed)
            }
            Action::SelectType(property_type) => match self.selection.select_type(property_type) {
                Ok(changed) => self.after_selection(changed),
                Err(err) => Transition::idle(self).with_notice(Notice::error(err.to_string())),
            },
            Action::SetKeyword(keyword) => {
                self.keyword = keyword;
                self.page.reset();
                Transition::idle(self)
            }
            Action::SetRange { field, lo, hi } => {
                self.filters.set_range(field, lo, hi);
                Transition::idle(self)
            }
            Action::ClearFilters => {
                self.filters.clear();
                if let Some(bounds) = self.bounds.for_category(self.category()) {
                    self.filters.seed(bounds);
                }
                Transition::idle(self)
            }
            Action::Search => {
                let request = self.issue_retrieval();
                let query = SearchQuery::from_input(&self.keyword, self.category());
                let page = self.fetch_page();
                Transition::idle(self).with_effect(Effect::Search {
                    request,
                    query,
                    page,
                })
            }
            Action::ApplyFilters => {
                let request = self.issue_retrieval();
                let category = self.category();
                let ranges = self.filters.to_query(category, self.bounds());
                let page = self.fetch_page();
                Transition::idle(self).with_effect(Effect::Filter {
                    request,
                    category,
                    ranges,
                    page,
                })
            }
            Action::ShowAll => {
                info!("switching to all listings");
                self.mode = RetrievalMode::All;
                self.keyword.clear();
                self.page.reset();
                self.latest_retrieval = None;
                Transition::idle(self)
            }
            Action::Refresh => {
                let load = self.issue_catalog_load();
                Transition::idle(self).with_effect(load)
            }
            Action::NextPage => {
                let total = self.visible_records().len();
                self.page.next(total);
                Transition::idle(self)
            }
            Action::PreviousPage => {
                self.page.prev();
                Transition::idle(self)
            }
            Action::SetPageSize(size) => {
                match NonZeroUsize::new(size).filter(|s| PAGE_SIZE_OPTIONS.contains(&s.get())) {
                    Some(size) => {
                        self.page.set_size(size);
                        Transition::idle(self)
                    }
                    None => Transition::idle(self).with_notice(Notice::error(format!(
                        "Page size must be one of {PAGE_SIZE_OPTIONS:?}"
                    ))),
                }
            }
            Action::Delete { id } => {
                let target = self.index.category_of(&id);
                Transition::idle(self).with_effect(Effect::Delete { target, id })
            }
            Action::Create { draft } => {
                let category = self.category();
                Transition::idle(self).with_effect(Effect::Create { category, draft })
            }
        }
    }

    pub fn complete(mut self, completion: Completion) -> Transition {
        match completion {
            Completion::CatalogLoaded { request, result } => {
                if self.latest_catalog != Some(request) {
                    debug!("discarding catalog load {request}: superseded");
                    return Transition::idle(self);
                }
                match result {
                    Ok(snapshot) => {
                        self.index = CanonicalIndex::build(&snapshot);
                        self.catalog = snapshot;
                        debug!("catalog loaded: {} listings", self.catalog.len());
                        Transition::idle(self)
                    }
                    Err(err) => {
                        warn!("catalog load failed: {err}");
                        Transition::idle(self).with_notice(Notice::from_error(&err, CATALOG_FAILED))
                    }
                }
            }
            Completion::BoundsLoaded { category, result } => {
                if category != self.category() {
                    debug!("discarding bounds for {category}: no longer selected");
                    return Transition::idle(self);
                }
                match result {
                    Ok(bounds) => {
                        self.filters.seed(&bounds);
                        self.bounds.replace(category, bounds);
                        Transition::idle(self)
                    }
                    Err(err) => {
                        warn!("bounds for {category} failed: {err}");
                        Transition::idle(self).with_notice(Notice::from_error(&err, BOUNDS_FAILED))
                    }
                }
            }
            Completion::SearchFinished {
                request,
                query,
                result,
            } => {
                if !self.accepts_retrieval(request, query.scope()) {
                    debug!("discarding search {request}: stale");
                    return Transition::idle(self);
                }
                match result {
                    Ok(results) => {
                        info!("search {request} returned {} listings", results.len());
                        self.mode = RetrievalMode::Search { query, results };
                        self.page.reset();
                        Transition::idle(self)
                    }
                    Err(err) => {
                        warn!("search {request} failed: {err}");
                        Transition::idle(self).with_notice(Notice::from_error(&err, SEARCH_FAILED))
                    }
                }
            }
            Completion::FilterFinished {
                request,
                category,
                ranges,
                result,
            } => {
                if !self.accepts_retrieval(request, Some(category)) {
                    debug!("discarding filter {request}: stale");
                    return Transition::idle(self);
                }
                match result {
                    Ok(results) => {
                        info!("filter {request} returned {} listings", results.len());
                        self.mode = RetrievalMode::Filter {
                            category,
                            ranges,
                            results,
                        };
                        self.page.reset();
                        Transition::idle(self)
                    }
                    Err(err) => {
                        warn!("filter {request} failed: {err}");
                        Transition::idle(self).with_notice(Notice::from_error(&err, FILTER_FAILED))
                    }
                }
            }
            Completion::DeleteFinished { target, id, result } => match result {
                Ok(()) => {
                    info!(
                        "deleted {id} from {}/{}",
                        target.ownership_label(),
                        target.type_label()
                    );
                    self.mode.remove_listing(&id);
                    let load = self.issue_catalog_load();
                    Transition::idle(self)
                        .with_effect(load)
                        .with_notice(Notice::success("Deleted successfully"))
                }
                Err(err) => {
                    warn!("delete of {id} failed: {err}");
                    Transition::idle(self).with_notice(Notice::from_error(&err, DELETE_FAILED))
                }
            },
            Completion::CreateFinished { category, result } => match result {
                Ok(listing) => {
                    info!("created {} in {category}", listing.id);
                    let load = self.issue_catalog_load();
                    let mut transition = Transition::idle(self)
                        .with_effect(load)
                        .with_notice(Notice::success("Created successfully"));
                    if category == transition.session.category() {
                        transition = transition.with_effect(Effect::FetchBounds { category });
                    }
                    transition
                }
                Err(err) => {
                    warn!("create in {category} failed: {err}");
                    Transition::idle(self).with_notice(Notice::from_error(&err, CREATE_FAILED))
                }
            },
        }
    }

    /// Records of the active mode, reconciled and narrowed by the keyword,
    /// before pagination.
    pub fn visible_records(&self) -> Vec<ReconciledRecord> {
        let needle = normalize_keyword(&self.keyword);
        let records = match self.mode.results() {
            None => canonical_records(&self.catalog),
            Some(results) => results
                .iter()
                .map(|listing| self.index.reconcile(listing))
                .collect(),
        };
        records
            .into_iter()
            .filter(|record| matches_keyword(record, needle.as_deref()))
            .collect()
    }

    pub fn page_view(&self) -> PageView {
        let visible = self.visible_records();
        let total = visible.len();
        PageView {
            records: self.page.slice(&visible).to_vec(),
            mode: self.mode.kind(),
            index: self.page.index(),
            size: self.page.size().get(),
            total,
            page_count: self.page.page_count(total),
            has_prev: self.page.has_prev(),
            has_next: self.page.has_next(total),
        }
    }

    fn after_selection(self, changed: bool) -> Transition {
        if !changed {
            return Transition::idle(self);
        }
        let category = self.category();
        debug!("category changed to {category}");
        Transition::idle(self).with_effect(Effect::FetchBounds { category })
    }

    fn accepts_retrieval(&self, request: RequestId, scope: Option<Category>) -> bool {
        self.latest_retrieval == Some(request)
            && scope.is_none_or(|category| category == self.category())
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    fn issue_retrieval(&mut self) -> RequestId {
        let request = self.next_request_id();
        self.latest_retrieval = Some(request);
        request
    }

    fn issue_catalog_load(&mut self) -> Effect {
        let request = self.next_request_id();
        self.latest_catalog = Some(request);
        Effect::LoadCatalog { request }
    }

    fn fetch_page(&self) -> PageRequest {
        PageRequest::first(self.config.fetch_size)
    }
}
