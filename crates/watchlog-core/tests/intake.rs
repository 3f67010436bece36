use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use watchlog_catalog::{CatalogError, CatalogSource};
use watchlog_core::{
    content_from_selection, resolve_details, tracked_copy, DetailsError, LibraryError, LibraryStore, MemoryStorage,
};
use watchlog_models::{
    Content, ContentDetails, ContentType, Genre, Rating, SearchMediaType, SearchResult, PLACEHOLDER_POSTER,
};

/// In-memory catalog that knows a single movie
struct FakeCatalog {
    details_available: bool,
    detail_calls: AtomicUsize,
}

impl FakeCatalog {
    fn new(details_available: bool) -> Self {
        Self {
            details_available,
            detail_calls: AtomicUsize::new(0),
        }
    }

    fn inception() -> ContentDetails {
        ContentDetails {
            id: "27205".to_string(),
            title: "Inception".to_string(),
            poster_url: "https://image.tmdb.org/t/p/w500/inc.jpg".to_string(),
            release_year: "2010".to_string(),
            genre: vec!["Action".to_string(), "Science Fiction".to_string()],
            overview: "Dreams within dreams.".to_string(),
            content_type: ContentType::Movie,
            seasons: None,
        }
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn source_name(&self) -> &str {
        "fake"
    }

    async fn search(&self, _query: &str) -> Vec<SearchResult> {
        Vec::new()
    }

    async fn popular(&self, _content_type: ContentType) -> Vec<SearchResult> {
        Vec::new()
    }

    async fn fetch_details(&self, id: &str, _content_type: ContentType) -> Result<ContentDetails, CatalogError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.details_available && id == "27205" {
            Ok(Self::inception())
        } else {
            Err(CatalogError::Api {
                status: 404,
                message: "The resource you requested could not be found.".to_string(),
            })
        }
    }

    async fn genres(&self, _content_type: ContentType) -> Vec<Genre> {
        vec![
            Genre { id: 28, name: "Action".to_string() },
            Genre { id: 878, name: "Science Fiction".to_string() },
        ]
    }
}

fn inception_hit() -> SearchResult {
    SearchResult {
        id: "27205".to_string(),
        title: "Inception".to_string(),
        poster_url: PLACEHOLDER_POSTER.to_string(),
        release_year: "2010".to_string(),
        media_type: SearchMediaType::Movie,
        overview: "From search.".to_string(),
        genre_ids: vec![878, 12, 28],
    }
}

#[tokio::test]
async fn test_selection_uses_full_details() {
    let catalog = FakeCatalog::new(true);
    let rating = Rating::new(5).ok();

    let content = content_from_selection(&catalog, &inception_hit(), rating).await.unwrap();

    assert_eq!(content.overview, "Dreams within dreams.");
    assert_eq!(content.genre, vec!["Action".to_string(), "Science Fiction".to_string()]);
    assert_eq!(content.rating, rating);
    assert!(content.watched);
    assert!(!content.watchlist);
}

#[tokio::test]
async fn test_selection_falls_back_to_search_result() {
    let catalog = FakeCatalog::new(false);

    let content = content_from_selection(&catalog, &inception_hit(), None).await.unwrap();

    assert_eq!(content.id, "27205");
    assert_eq!(content.overview, "From search.");
    // 12 is not in the genre list and is skipped
    assert_eq!(content.genre, vec!["Science Fiction".to_string(), "Action".to_string()]);
    assert_eq!(content.rating, None);
    assert!(content.watched);
}

#[tokio::test]
async fn test_selection_rejects_people() {
    let catalog = FakeCatalog::new(true);
    let mut person = inception_hit();
    person.media_type = SearchMediaType::Person;
    person.title = "Christopher Nolan".to_string();

    let err = content_from_selection(&catalog, &person, None).await.unwrap_err();
    assert_eq!(err, LibraryError::NotTrackable("Christopher Nolan".to_string()));
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resolve_details_prefers_library_copy() {
    let catalog = FakeCatalog::new(true);
    let mut store = LibraryStore::open(MemoryStorage::new(), "watchedContent");
    let rated = Content::new("27205", "Inception", ContentType::Movie).with_rating(Rating::new(3).ok());
    store.add_to_watched(rated).unwrap();

    let content = resolve_details(&store, &catalog, "27205", ContentType::Movie).await.unwrap();

    assert_eq!(content.rating, Rating::new(3).ok());
    assert!(content.watched);
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_resolve_details_fetches_untracked_titles() {
    let catalog = FakeCatalog::new(true);
    let store = LibraryStore::open(MemoryStorage::new(), "watchedContent");

    let content = resolve_details(&store, &catalog, "27205", ContentType::Movie).await.unwrap();
    assert_eq!(content.title, "Inception");
    assert_eq!(content.rating, None);
    assert!(!content.watched);
    assert!(!content.watchlist);

    let err = resolve_details(&store, &catalog, "999", ContentType::Movie).await.unwrap_err();
    assert!(matches!(&err, DetailsError::Catalog(e) if e.is_not_found()));
    assert_eq!(err.user_message(), "The resource you requested could not be found.");
}

#[tokio::test]
async fn test_resolve_details_rejects_id_tracked_as_other_type() {
    let catalog = FakeCatalog::new(true);
    let mut store = LibraryStore::open(MemoryStorage::new(), "watchedContent");
    // Movie 1399 and show 1399 are different titles in the catalog
    store
        .add_to_watched(Content::new("1399", "Some Movie", ContentType::Movie))
        .unwrap();

    let err = resolve_details(&store, &catalog, "1399", ContentType::Tv).await.unwrap_err();

    assert!(matches!(
        &err,
        DetailsError::TypeMismatch { id, tracked: ContentType::Movie, requested: ContentType::Tv } if id == "1399"
    ));
    assert_eq!(err.user_message(), "'1399' is tracked as a movie, not a tv");
    assert_eq!(catalog.detail_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_tracked_copy_checks_type() {
    let mut store = LibraryStore::open(MemoryStorage::new(), "watchedContent");
    store
        .add_to_watchlist(Content::new("1399", "Game of Thrones", ContentType::Tv))
        .unwrap();

    let found = tracked_copy(&store, "1399", ContentType::Tv).unwrap();
    assert_eq!(found.map(|c| c.title.as_str()), Some("Game of Thrones"));
    assert!(tracked_copy(&store, "1399", ContentType::Movie).is_err());
    assert_eq!(tracked_copy(&store, "27205", ContentType::Movie).unwrap(), None);
}
