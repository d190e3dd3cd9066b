//! Repairs search and filter results, which arrive without category
//! metadata, by looking their ids up in the canonical dataset.

use crate::error::CatalogError;
use crate::error::Result;
use crate::listing::CatalogSnapshot;
use crate::listing::Listing;
use crate::taxonomy::Category;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordCategory {
    Known(Category),
    Unknown,
}

impl RecordCategory {
    pub fn known(self) -> Option<Category> {
        match self {
            RecordCategory::Known(category) => Some(category),
            RecordCategory::Unknown => None,
        }
    }

    pub fn ownership_label(self) -> &'static str {
        match self {
            RecordCategory::Known(category) => category.ownership.into(),
            RecordCategory::Unknown => "unknown",
        }
    }

    pub fn type_label(self) -> &'static str {
        match self {
            RecordCategory::Known(category) => category.property_type.into(),
            RecordCategory::Unknown => "unknown",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReconciledRecord {
    pub listing: Listing,
    pub category: RecordCategory,
}

/// id → category over the canonical dataset. The first occurrence of an id
/// wins.
#[derive(Clone, Debug, Default)]
pub struct CanonicalIndex {
    by_id: HashMap<String, Category>,
}

impl CanonicalIndex {
    pub fn build(snapshot: &CatalogSnapshot) -> Self {
        let mut by_id = HashMap::with_capacity(snapshot.len());
        for (category, listing) in snapshot.entries() {
            by_id.entry(listing.id.clone()).or_insert(category);
        }
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn lookup(&self, id: &str) -> Result<Category> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| CatalogError::ReconciliationMiss { id: id.to_string() })
    }

    pub fn category_of(&self, id: &str) -> RecordCategory {
        match self.lookup(id) {
            Ok(category) => RecordCategory::Known(category),
            Err(err) => {
                debug!("{err}; labelling as unknown");
                RecordCategory::Unknown
            }
        }
    }

    pub fn reconcile(&self, listing: &Listing) -> ReconciledRecord {
        ReconciledRecord {
            listing: listing.clone(),
            category: self.category_of(&listing.id),
        }
    }
}

/// The canonical dataset flattened into records that already know their
/// category.
pub fn canonical_records(snapshot: &CatalogSnapshot) -> Vec<ReconciledRecord> {
    snapshot
        .entries()
        .map(|(category, listing)| ReconciledRecord {
            listing: listing.clone(),
            category: RecordCategory::Known(category),
        })
        .collect()
}
