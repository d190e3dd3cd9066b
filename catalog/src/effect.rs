//! Inputs to and outputs of [`crate::Session`] transitions.

use std::fmt;

use crate::backend::PageRequest;
use crate::bounds::Bounds;
use crate::error::Result;
use crate::filter::RangeQuery;
use crate::listing::CatalogSnapshot;
use crate::listing::Listing;
use crate::listing::ListingDraft;
use crate::mode::SearchQuery;
use crate::reconcile::RecordCategory;
use crate::taxonomy::Category;
use crate::taxonomy::Ownership;
use crate::taxonomy::PropertyGroup;
use crate::taxonomy::PropertyType;
use crate::taxonomy::RangeField;

/// Monotonic tag attached to catalog loads and retrievals so that only the
/// newest answer is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something the user did.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SelectOwnership(Ownership),
    SelectGroup(PropertyGroup),
    SelectType(PropertyType),
    SetKeyword(String),
    SetRange {
        field: RangeField,
        lo: String,
        hi: String,
    },
    ClearFilters,
    Search,
    ApplyFilters,
    ShowAll,
    Refresh,
    NextPage,
    PreviousPage,
    SetPageSize(usize),
    Delete { id: String },
    Create { draft: ListingDraft },
}

/// Work the session wants done against the catalog service.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog {
        request: RequestId,
    },
    FetchBounds {
        category: Category,
    },
    Search {
        request: RequestId,
        query: SearchQuery,
        page: PageRequest,
    },
    Filter {
        request: RequestId,
        category: Category,
        ranges: RangeQuery,
        page: PageRequest,
    },
    Delete {
        target: RecordCategory,
        id: String,
    },
    Create {
        category: Category,
        draft: ListingDraft,
    },
}

/// The outcome of an [`Effect`], echoing what it was issued for.
#[derive(Clone, Debug, PartialEq)]
pub enum Completion {
    CatalogLoaded {
        request: RequestId,
        result: Result<CatalogSnapshot>,
    },
    BoundsLoaded {
        category: Category,
        result: Result<Bounds>,
    },
    SearchFinished {
        request: RequestId,
        query: SearchQuery,
        result: Result<Vec<Listing>>,
    },
    FilterFinished {
        request: RequestId,
        category: Category,
        ranges: RangeQuery,
        result: Result<Vec<Listing>>,
    },
    DeleteFinished {
        target: RecordCategory,
        id: String,
        result: Result<()>,
    },
    CreateFinished {
        category: Category,
        result: Result<Listing>,
    },
}
