use crate::filter::RangeQuery;
use crate::listing::Listing;
use crate::taxonomy::Category;
use serde::Serialize;
use strum_macros::Display;

/// What a search asks the service for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SearchQuery {
    Keyword(String),
    Category(Category),
}

impl SearchQuery {
    /// A non-blank keyword wins; otherwise search the current category.
    pub fn from_input(keyword: &str, category: Category) -> Self {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            SearchQuery::Category(category)
        } else {
            SearchQuery::Keyword(keyword.to_string())
        }
    }

    /// The category a result depends on, if any.
    pub fn scope(&self) -> Option<Category> {
        match self {
            SearchQuery::Keyword(_) => None,
            SearchQuery::Category(category) => Some(*category),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ModeKind {
    All,
    Search,
    Filter,
}

/// The single active retrieval strategy and the raw records it produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RetrievalMode {
    #[default]
    All,
    Search {
        query: SearchQuery,
        results: Vec<Listing>,
    },
    Filter {
        category: Category,
        ranges: RangeQuery,
        results: Vec<Listing>,
    },
}

impl RetrievalMode {
    pub fn kind(&self) -> ModeKind {
        match self {
            RetrievalMode::All => ModeKind::All,
            RetrievalMode::Search { .. } => ModeKind::Search,
            RetrievalMode::Filter { .. } => ModeKind::Filter,
        }
    }

    /// Raw results of a search or filter; `None` in `All` mode.
    pub fn results(&self) -> Option<&[Listing]> {
        match self {
            RetrievalMode::All => None,
            RetrievalMode::Search { results, .. } | RetrievalMode::Filter { results, .. } => {
                Some(results)
            }
        }
    }

    pub fn remove_listing(&mut self, id: &str) -> bool {
        match self {
            RetrievalMode::All => false,
            RetrievalMode::Search { results, .. } | RetrievalMode::Filter { results, .. } => {
                let before = results.len();
                results.retain(|listing| listing.id != id);
                results.len() != before
            }
        }
    }
}
