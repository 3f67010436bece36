use crate::error::{DetailsError, LibraryError};
use crate::library::LibraryStore;
use crate::storage::StorageBackend;
use tracing::{debug, info};
use uuid::Uuid;
use watchlog_catalog::CatalogSource;
use watchlog_models::{Content, ContentType, Rating, SearchResult};

/// Trackable candidates from a search, in catalog order
pub fn select_candidates(results: Vec<SearchResult>, limit: usize) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|r| !r.is_person())
        .take(limit)
        .collect()
}

/// Build a watched record for a chosen search hit.
///
/// Full details are preferred. When the catalog cannot provide them the hit
/// itself is used, with its genre ids resolved to names.
pub async fn content_from_selection<C>(
    catalog: &C,
    selected: &SearchResult,
    rating: Option<Rating>,
) -> Result<Content, LibraryError>
where
    C: CatalogSource + ?Sized,
{
    let content_type = selected
        .media_type
        .content_type()
        .ok_or_else(|| LibraryError::NotTrackable(selected.title.clone()))?;

    if let Some(details) = catalog.get_details(&selected.id, content_type).await {
        return Ok(details.into_content(rating, true, false));
    }

    debug!(id = %selected.id, "Details unavailable, building record from search result");
    let genre = catalog
        .resolve_genre_names(&selected.genre_ids, content_type)
        .await;

    Ok(Content {
        id: selected.id.clone(),
        title: selected.title.clone(),
        poster_url: selected.poster_url.clone(),
        release_year: selected.release_year.clone(),
        genre,
        overview: selected.overview.clone(),
        content_type,
        rating,
        watched: true,
        watchlist: false,
        seasons: None,
    })
}

/// A title the catalog doesn't know, entered by hand
pub fn manual_content(
    title: &str,
    content_type: ContentType,
    rating: Option<Rating>,
) -> Result<Content, LibraryError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LibraryError::MissingField("title"));
    }

    let id = Uuid::new_v4().to_string();
    info!(id = %id, title, "Created manual entry");
    let mut content = Content::new(id, title, content_type).with_rating(rating);
    content.watched = true;
    Ok(content)
}

/// The library's copy of `id`, if it is tracked as `content_type`.
///
/// Catalog ids are only unique per type, but the library holds one record per
/// id, so an id tracked under the other type is reported rather than served.
pub fn tracked_copy<'a, S: StorageBackend>(
    store: &'a LibraryStore<S>,
    id: &str,
    content_type: ContentType,
) -> Result<Option<&'a Content>, DetailsError> {
    match store.get_content_by_id(id) {
        Some(content) if content.content_type != content_type => Err(DetailsError::TypeMismatch {
            id: id.to_string(),
            tracked: content.content_type,
            requested: content_type,
        }),
        found => Ok(found),
    }
}

/// Details for one title, preferring the library's copy (which carries the
/// user's rating and flags) over a catalog fetch.
pub async fn resolve_details<S, C>(
    store: &LibraryStore<S>,
    catalog: &C,
    id: &str,
    content_type: ContentType,
) -> Result<Content, DetailsError>
where
    S: StorageBackend,
    C: CatalogSource + ?Sized,
{
    if let Some(content) = tracked_copy(store, id, content_type)? {
        debug!(id, "Details served from library");
        return Ok(content.clone());
    }

    let details = catalog.fetch_details(id, content_type).await?;
    Ok(details.into_content(None, false, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{SearchMediaType, PLACEHOLDER_POSTER, UNKNOWN_YEAR};

    fn hit(id: &str, media_type: SearchMediaType) -> SearchResult {
        SearchResult {
            id: id.to_string(),
            title: format!("Title {}", id),
            poster_url: PLACEHOLDER_POSTER.to_string(),
            release_year: UNKNOWN_YEAR.to_string(),
            media_type,
            overview: String::new(),
            genre_ids: Vec::new(),
        }
    }

    #[test]
    fn test_select_candidates_drops_people_and_limits() {
        let results = vec![
            hit("1", SearchMediaType::Person),
            hit("2", SearchMediaType::Movie),
            hit("3", SearchMediaType::Tv),
            hit("4", SearchMediaType::Movie),
        ];
        let picked = select_candidates(results, 2);
        assert_eq!(picked.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec!["2", "3"]);
    }

    #[test]
    fn test_manual_content() {
        let rating = Rating::new(4).ok();
        let content = manual_content("  Home Movie  ", ContentType::Movie, rating).unwrap();
        assert_eq!(content.title, "Home Movie");
        assert_eq!(content.poster_url, PLACEHOLDER_POSTER);
        assert_eq!(content.release_year, UNKNOWN_YEAR);
        assert!(content.watched);
        assert!(!content.watchlist);
        assert_eq!(content.rating, rating);
        assert!(Uuid::parse_str(&content.id).is_ok());

        let other = manual_content("Home Movie", ContentType::Movie, None).unwrap();
        assert_ne!(content.id, other.id);
    }

    #[test]
    fn test_manual_content_requires_title() {
        assert_eq!(
            manual_content("   ", ContentType::Tv, None),
            Err(LibraryError::MissingField("title"))
        );
    }
}
