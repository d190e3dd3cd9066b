/*!
# Estate Catalog

Faceted retrieval and reconciliation engine for a property-listing catalog:
- **Taxonomy**: ownership × property group × property type, driven by one lookup table
- **Bounds**: per-category numeric envelopes that seed and clamp range filters
- **Retrieval modes**: all listings, keyword or categorical search, range filter
- **Reconciliation**: search and filter results get their category back from the canonical dataset
- **Pagination**: fixed-size windows over whatever is visible

## Architecture

```text
Action ──> Session::apply ──> Transition { session, effects, notice }
                                   │
                                   └─> Browser runs effects on a CatalogBackend
                                             │
Completion <─────────────────────────────────┘
   └─> Session::complete (stale answers dropped by category / request id)
```

The session never performs I/O. [`Browser`] owns one session, executes its
effects concurrently and feeds completions back as they arrive.

## Example

```rust,no_run
use std::sync::Arc;

use estate_catalog::{Action, Browser, PropertyGroup, Session, SessionConfig, SnapshotBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let backend = SnapshotBackend::from_json(&std::fs::read_to_string("catalog.json")?)?;
    let session = Session::new(SessionConfig::default())?;
    let mut browser = Browser::start(session, Arc::new(backend));
    browser.dispatch(Action::SelectGroup(PropertyGroup::Commercial));
    browser.dispatch(Action::ApplyFilters);
    browser.settle().await;

    for record in browser.session().page_view().records {
        println!("{} {}", record.category.type_label(), record.listing.id);
    }
    Ok(())
}
```
*/

mod backend;
mod bounds;
mod browser;
mod config;
mod effect;
mod error;
mod filter;
mod keyword;
mod listing;
mod mode;
mod notice;
mod offline;
mod paginate;
mod reconcile;
mod selector;
mod session;
mod taxonomy;

pub use backend::{CatalogBackend, PageRequest};
pub use bounds::{Bounds, BoundsCache, Envelope, StatsReport};
pub use browser::Browser;
pub use config::SessionConfig;
pub use effect::{Action, Completion, Effect, RequestId};
pub use error::{CatalogError, Result};
pub use filter::{ClampedRange, FilterState, RangeInput, RangeQuery};
pub use keyword::{listing_haystack, listing_text, matches_keyword, normalize_keyword};
pub use listing::{
    CatalogSnapshot, CatalogSummary, CommercialBranch, Listing, ListingData, ListingDraft,
    OwnershipBranch, ResidentialBranch,
};
pub use mode::{ModeKind, RetrievalMode, SearchQuery};
pub use notice::{Notice, NoticeTone};
pub use offline::SnapshotBackend;
pub use paginate::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS, PageWindow, paginate};
pub use reconcile::{CanonicalIndex, ReconciledRecord, RecordCategory, canonical_records};
pub use selector::CategorySelection;
pub use session::{PageView, Session, Transition};
pub use taxonomy::{
    CATEGORY_TABLE, Category, CategoryEntry, Ownership, PropertyGroup, PropertyType, RangeField,
};
