use crate::error::CatalogError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use watchlog_models::{
    ContentDetails, ContentType, Genre, SearchMediaType, SearchResult, PLACEHOLDER_POSTER, UNKNOWN_YEAR,
};

const DEFAULT_ERROR_MESSAGE: &str = "API request failed";

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

/// Paged list response; items stay untyped until each one is checked
#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TmdbListItem {
    id: u64,
    media_type: Option<String>,
    title: Option<String>,
    name: Option<String>,
    poster_path: Option<String>,
    // People carry a profile image instead of a poster
    profile_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    genre_ids: Option<Vec<u32>>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenre {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct TmdbGenreList {
    #[serde(default)]
    genres: Vec<TmdbGenre>,
}

#[derive(Debug, Deserialize)]
struct TmdbDetails {
    id: u64,
    title: Option<String>,
    name: Option<String>,
    poster_path: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    #[serde(default)]
    genres: Vec<TmdbGenre>,
    number_of_seasons: Option<u32>,
}

/// Everything needed to address the catalog and normalize its records
pub(crate) struct Endpoint<'a> {
    pub client: &'a Client,
    pub base_url: &'a str,
    pub api_key: &'a str,
    pub image_base_url: &'a str,
}

impl<'a> Endpoint<'a> {
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        // The key is attached after logging so it never reaches the logs
        debug!(url = %url, "Catalog request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key)])
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn search_multi(&self, query: &str) -> Result<Vec<SearchResult>, CatalogError> {
        let page: TmdbPage = self.get_json("search/multi", &[("query", query)]).await?;
        Ok(self.normalize_page(page, None))
    }

    pub async fn popular(&self, content_type: ContentType) -> Result<Vec<SearchResult>, CatalogError> {
        let path = format!("{}/popular", content_type.as_str());
        let page: TmdbPage = self.get_json(&path, &[]).await?;
        Ok(self.normalize_page(page, Some(content_type.into())))
    }

    pub async fn details(&self, id: &str, content_type: ContentType) -> Result<ContentDetails, CatalogError> {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CatalogError::InvalidRecord(format!("'{}' is not a catalog id", id)));
        }
        let path = format!("{}/{}", content_type.as_str(), id);
        let details: TmdbDetails = self.get_json(&path, &[]).await?;
        self.normalize_details(details, content_type)
    }

    pub async fn genres(&self, content_type: ContentType) -> Result<Vec<Genre>, CatalogError> {
        let path = format!("genre/{}/list", content_type.as_str());
        let list: TmdbGenreList = self.get_json(&path, &[]).await?;
        Ok(list
            .genres
            .into_iter()
            .map(|g| Genre { id: g.id, name: g.name })
            .collect())
    }

    /// Keep the items that pass the checks, in catalog order
    fn normalize_page(&self, page: TmdbPage, default_type: Option<SearchMediaType>) -> Vec<SearchResult> {
        page.results
            .into_iter()
            .filter_map(|value| {
                let item = match serde_json::from_value::<TmdbListItem>(value) {
                    Ok(item) => item,
                    Err(e) => {
                        debug!(error = %e, "Skipping malformed catalog item");
                        return None;
                    }
                };
                match self.normalize_list_item(item, default_type) {
                    Ok(result) => Some(result),
                    Err(e) => {
                        debug!(error = %e, "Skipping catalog item");
                        None
                    }
                }
            })
            .collect()
    }

    fn normalize_list_item(
        &self,
        item: TmdbListItem,
        default_type: Option<SearchMediaType>,
    ) -> Result<SearchResult, CatalogError> {
        let media_type = match item.media_type.as_deref() {
            Some("movie") => SearchMediaType::Movie,
            Some("tv") => SearchMediaType::Tv,
            Some("person") => SearchMediaType::Person,
            Some(other) => {
                return Err(CatalogError::InvalidRecord(format!(
                    "item {} has unsupported media type '{}'",
                    item.id, other
                )))
            }
            None => default_type.ok_or_else(|| {
                CatalogError::InvalidRecord(format!("item {} has no media type", item.id))
            })?,
        };

        let title = pick_title(item.title, item.name)
            .ok_or_else(|| CatalogError::InvalidRecord(format!("item {} has no title", item.id)))?;

        let image = item.poster_path.or(item.profile_path);

        Ok(SearchResult {
            id: item.id.to_string(),
            title,
            poster_url: self.poster_url(image.as_deref()),
            release_year: release_year(item.release_date.as_deref(), item.first_air_date.as_deref()),
            media_type,
            overview: item.overview.unwrap_or_default(),
            genre_ids: item.genre_ids.unwrap_or_default(),
        })
    }

    fn normalize_details(&self, details: TmdbDetails, content_type: ContentType) -> Result<ContentDetails, CatalogError> {
        // Movies are titled, shows are named; accept either before giving up
        let title = match content_type {
            ContentType::Movie => pick_title(details.title, details.name),
            ContentType::Tv => pick_title(details.name, details.title),
        }
        .ok_or_else(|| CatalogError::InvalidRecord(format!("{} {} has no title", content_type, details.id)))?;

        let release = match content_type {
            ContentType::Movie => release_year(details.release_date.as_deref(), None),
            ContentType::Tv => release_year(details.first_air_date.as_deref(), None),
        };

        Ok(ContentDetails {
            id: details.id.to_string(),
            title,
            poster_url: self.poster_url(details.poster_path.as_deref()),
            release_year: release,
            genre: details.genres.into_iter().map(|g| g.name).collect(),
            overview: details.overview.unwrap_or_default(),
            content_type,
            seasons: match content_type {
                ContentType::Tv => details.number_of_seasons,
                ContentType::Movie => None,
            },
        })
    }

    fn poster_url(&self, path: Option<&str>) -> String {
        match path.filter(|p| !p.is_empty()) {
            Some(p) => format!("{}{}", self.image_base_url.trim_end_matches('/'), p),
            None => PLACEHOLDER_POSTER.to_string(),
        }
    }
}

fn pick_title(primary: Option<String>, secondary: Option<String>) -> Option<String> {
    primary
        .into_iter()
        .chain(secondary)
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
}

/// Year part of the first non-empty `YYYY-MM-DD` date
fn release_year(primary: Option<&str>, secondary: Option<&str>) -> String {
    primary
        .into_iter()
        .chain(secondary)
        .filter_map(|date| date.split('-').next())
        .map(str::trim)
        .find(|year| !year.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn endpoint(client: &Client) -> Endpoint<'_> {
        Endpoint {
            client,
            base_url: "http://localhost",
            api_key: "key",
            image_base_url: "https://image.tmdb.org/t/p/w500",
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(release_year(Some("2010-07-15"), None), "2010");
        assert_eq!(release_year(Some(""), Some("2008-01-20")), "2008");
        assert_eq!(release_year(None, None), UNKNOWN_YEAR);
        assert_eq!(release_year(Some(""), Some("")), UNKNOWN_YEAR);
    }

    #[test]
    fn test_normalize_page_skips_bad_items() {
        let client = Client::new();
        let ep = endpoint(&client);
        let page: TmdbPage = serde_json::from_value(json!({
            "results": [
                {"id": 27205, "media_type": "movie", "title": "Inception",
                 "poster_path": "/inc.jpg", "release_date": "2010-07-15",
                 "overview": "Dreams.", "genre_ids": [28, 878]},
                {"id": 1, "media_type": "collection", "name": "Box set"},
                {"id": "not-a-number", "media_type": "movie", "title": "Broken"},
                {"id": 2, "media_type": "tv", "name": "   "},
                {"id": 1399, "media_type": "tv", "name": "Game of Thrones", "first_air_date": "2011-04-17"}
            ]
        }))
        .unwrap();

        let results = ep.normalize_page(page, None);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "27205");
        assert_eq!(results[0].poster_url, "https://image.tmdb.org/t/p/w500/inc.jpg");
        assert_eq!(results[0].genre_ids, vec![28, 878]);
        assert_eq!(results[1].media_type, SearchMediaType::Tv);
        assert_eq!(results[1].poster_url, "/placeholder.jpg");
        assert_eq!(results[1].overview, "");
    }

    #[test]
    fn test_popular_items_take_default_type() {
        let client = Client::new();
        let ep = endpoint(&client);
        let page: TmdbPage = serde_json::from_value(json!({
            "results": [{"id": 94997, "name": "House of the Dragon", "first_air_date": "2022-08-21"}]
        }))
        .unwrap();

        let results = ep.normalize_page(page, Some(SearchMediaType::Tv));
        assert_eq!(results[0].media_type, SearchMediaType::Tv);
        assert_eq!(results[0].release_year, "2022");
    }

    #[test]
    fn test_normalize_tv_details() {
        let client = Client::new();
        let ep = endpoint(&client);
        let details: TmdbDetails = serde_json::from_value(json!({
            "id": 1399,
            "name": "Game of Thrones",
            "first_air_date": "2011-04-17",
            "genres": [{"id": 18, "name": "Drama"}],
            "number_of_seasons": 8
        }))
        .unwrap();

        let normalized = ep.normalize_details(details, ContentType::Tv).unwrap();
        assert_eq!(normalized.title, "Game of Thrones");
        assert_eq!(normalized.release_year, "2011");
        assert_eq!(normalized.genre, vec!["Drama".to_string()]);
        assert_eq!(normalized.seasons, Some(8));
        assert_eq!(normalized.overview, "");
    }
}
