use std::time::Duration;

use async_trait::async_trait;
use estate_catalog::Bounds;
use estate_catalog::CatalogBackend;
use estate_catalog::CatalogError;
use estate_catalog::CatalogSnapshot;
use estate_catalog::Category;
use estate_catalog::Listing;
use estate_catalog::ListingDraft;
use estate_catalog::PageRequest;
use estate_catalog::RangeQuery;
use estate_catalog::RecordCategory;
use estate_catalog::Result;
use estate_catalog::StatsReport;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1/real-estate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Error body the service sends with 4xx/5xx answers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct HttpCatalogBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpCatalogBackend {
    /// `api_base` is the listing collection URL, e.g. [`DEFAULT_API_BASE`].
    pub fn new(api_base: &str) -> Result<Self> {
        Self::with_timeout(api_base, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(api_base: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(api_base)
            .map_err(|err| CatalogError::InvalidConfig(format!("api base {api_base}: {err}")))?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidConfig(format!(
                "api base {api_base} cannot carry a path"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::InvalidConfig(format!("http client: {err}")))?;
        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = send(request).await?;
        let status = resp.status();
        resp.json().await.map_err(|err| {
            CatalogError::unreachable(format!("malformed {status} response: {err}"))
        })
    }
}

async fn send(request: RequestBuilder) -> Result<Response> {
    let resp = request
        .send()
        .await
        .map_err(|err| CatalogError::unreachable(err.to_string()))?;
    let status = resp.status();
    debug!("{} -> {status}", resp.url());
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.message);
    Err(CatalogError::from_status(status.as_u16(), message))
}

fn category_params(category: Category) -> [(&'static str, &'static str); 2] {
    [
        ("ownership", category.ownership.into()),
        ("propertyType", category.property_type.into()),
    ]
}

fn page_params(page: PageRequest) -> [(&'static str, String); 2] {
    [
        ("page", page.page.to_string()),
        ("size", page.size.to_string()),
    ]
}

#[async_trait]
impl CatalogBackend for HttpCatalogBackend {
    async fn list_all(&self) -> Result<CatalogSnapshot> {
        self.fetch(self.http.get(self.base.clone())).await
    }

    async fn bounds(&self, category: Category) -> Result<Bounds> {
        let request = self
            .http
            .get(self.endpoint(["stats"]))
            .query(&category_params(category));
        let report: StatsReport = self.fetch(request).await?;
        Ok(report.into_bounds(category))
    }

    async fn search_by_keyword(&self, keyword: &str, page: PageRequest) -> Result<Vec<Listing>> {
        let request = self
            .http
            .get(self.endpoint(["search", "keyword"]))
            .query(&[("keyword", keyword)])
            .query(&page_params(page));
        self.fetch(request).await
    }

    async fn search_by_category(
        &self,
        category: Category,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let request = self
            .http
            .get(self.endpoint(["search"]))
            .query(&category_params(category))
            .query(&page_params(page));
        self.fetch(request).await
    }

    async fn filter(
        &self,
        category: Category,
        ranges: &RangeQuery,
        page: PageRequest,
    ) -> Result<Vec<Listing>> {
        let request = self
            .http
            .get(self.endpoint(["filter"]))
            .query(&category_params(category))
            .query(&ranges.to_params())
            .query(&page_params(page));
        self.fetch(request).await
    }

    async fn delete_listing(&self, target: RecordCategory, id: &str) -> Result<()> {
        let url = self.endpoint([target.ownership_label(), target.type_label(), id]);
        send(self.http.delete(url)).await?;
        Ok(())
    }

    async fn create_listing(&self, category: Category, draft: &ListingDraft) -> Result<Listing> {
        let url = self.endpoint(category.entry().create_path.split('/'));
        let request = self.http.post(url).json(&draft.payload(category));
        self.fetch(request).await
    }
}
