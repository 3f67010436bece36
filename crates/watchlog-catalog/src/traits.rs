use crate::error::CatalogError;
use async_trait::async_trait;
use tracing::warn;
use watchlog_models::{ContentDetails, ContentType, Genre, SearchResult};

/// Read-only catalog of movie/TV metadata.
///
/// Everything except [`CatalogSource::fetch_details`] is fail-soft: failures come
/// back as an empty list or `None`, never as an error.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Multi-type search; an empty query returns nothing without a request
    async fn search(&self, query: &str) -> Vec<SearchResult>;

    async fn popular(&self, content_type: ContentType) -> Vec<SearchResult>;

    /// Full metadata for one title, surfacing the catalog's error
    async fn fetch_details(&self, id: &str, content_type: ContentType) -> Result<ContentDetails, CatalogError>;

    async fn get_details(&self, id: &str, content_type: ContentType) -> Option<ContentDetails> {
        match self.fetch_details(id, content_type).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!(source = self.source_name(), id, %content_type, error = %e, "Failed to fetch details");
                None
            }
        }
    }

    async fn genres(&self, content_type: ContentType) -> Vec<Genre>;

    async fn resolve_genre_names(&self, genre_ids: &[u32], content_type: ContentType) -> Vec<String> {
        if genre_ids.is_empty() {
            return Vec::new();
        }
        let genres = self.genres(content_type).await;
        genre_names(&genres, genre_ids)
    }
}

/// Map genre ids to names in input order, skipping ids the list doesn't know
pub fn genre_names(genres: &[Genre], genre_ids: &[u32]) -> Vec<String> {
    genre_ids
        .iter()
        .filter_map(|id| genres.iter().find(|g| g.id == *id))
        .map(|g| g.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genre_names_keeps_order_and_skips_unknown() {
        let genres = vec![
            Genre { id: 28, name: "Action".to_string() },
            Genre { id: 878, name: "Science Fiction".to_string() },
        ];
        assert_eq!(
            genre_names(&genres, &[878, 1, 28]),
            vec!["Science Fiction".to_string(), "Action".to_string()]
        );
        assert!(genre_names(&[], &[28]).is_empty());
    }
}
