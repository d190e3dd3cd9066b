use crate::error::CatalogError;
use crate::error::Result;
use crate::paginate::DEFAULT_PAGE_SIZE;
use crate::paginate::PAGE_SIZE_OPTIONS;
use serde::Deserialize;
use serde::Serialize;
use std::num::NonZeroUsize;

/// Tunables of a browsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Records per visible page; one of [`PAGE_SIZE_OPTIONS`].
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// How many records a search or filter asks the service for. Results are
    /// paginated locally, so this should cover the whole result set.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_fetch_size() -> usize {
    1000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(CatalogError::InvalidConfig(format!(
                "page_size must be one of {PAGE_SIZE_OPTIONS:?}, got {}",
                self.page_size
            )));
        }
        if self.fetch_size == 0 {
            return Err(CatalogError::InvalidConfig(
                "fetch_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }
}
