//! HTTP implementation of [`estate_catalog::CatalogBackend`] for the
//! `/api/v1/real-estate` service.

mod client;

pub use client::DEFAULT_API_BASE;
pub use client::DEFAULT_TIMEOUT;
pub use client::HttpCatalogBackend;
