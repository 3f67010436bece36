use crate::error::CatalogError;
use crate::outcome::FetchOutcome;
use crate::sequence::{SearchSequencer, SearchTicket, TrackedSearch};
use crate::tmdb::api::Endpoint;
use crate::traits::CatalogSource;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use watchlog_config::CatalogConfig;
use watchlog_models::{ContentDetails, ContentType, Genre, SearchResult};

/// TMDB v3 catalog client
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    image_base_url: String,
    sequencer: Arc<SearchSequencer>,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, config: &CatalogConfig) -> Result<Self, CatalogError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(CatalogError::MissingApiKey);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("watchlog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Catalog client ready");

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: config.base_url.clone(),
            image_base_url: config.image_base_url.clone(),
            sequencer: Arc::new(SearchSequencer::new()),
        })
    }

    /// Client against a different base URL (local stubs in tests)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, CatalogError> {
        let config = CatalogConfig {
            base_url: base_url.into(),
            ..CatalogConfig::default()
        };
        Self::new(api_key, &config)
    }

    fn endpoint(&self) -> Endpoint<'_> {
        Endpoint {
            client: &self.client,
            base_url: &self.base_url,
            api_key: &self.api_key,
            image_base_url: &self.image_base_url,
        }
    }

    async fn search_outcome(&self, query: &str) -> FetchOutcome<Vec<SearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            debug!("Empty search query, skipping request");
            return FetchOutcome::Empty;
        }
        FetchOutcome::from_list(self.endpoint().search_multi(query).await)
    }

    /// Search and tag the response so stale results can be dropped
    pub async fn search_tracked(&self, query: &str) -> TrackedSearch {
        let ticket = self.sequencer.issue();
        let results = self.search_outcome(query).await.into_vec("search");
        TrackedSearch { ticket, results }
    }

    /// Whether `ticket` belongs to the most recently issued search
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.sequencer.is_current(ticket)
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn source_name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> Vec<SearchResult> {
        self.search_outcome(query).await.into_vec("search")
    }

    async fn popular(&self, content_type: ContentType) -> Vec<SearchResult> {
        FetchOutcome::from_list(self.endpoint().popular(content_type).await).into_vec("popular")
    }

    async fn fetch_details(&self, id: &str, content_type: ContentType) -> Result<ContentDetails, CatalogError> {
        self.endpoint().details(id, content_type).await
    }

    async fn get_details(&self, id: &str, content_type: ContentType) -> Option<ContentDetails> {
        FetchOutcome::from_lookup(self.endpoint().details(id, content_type).await).into_option("details")
    }

    async fn genres(&self, content_type: ContentType) -> Vec<Genre> {
        FetchOutcome::from_list(self.endpoint().genres(content_type).await).into_vec("genres")
    }
}
