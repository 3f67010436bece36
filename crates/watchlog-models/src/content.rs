use crate::rating::Rating;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Poster sentinel used when the catalog has no image for a title
pub const PLACEHOLDER_POSTER: &str = "/placeholder.jpg";

/// Release year sentinel used when no date is known
pub const UNKNOWN_YEAR: &str = "Unknown";

/// A tracked movie or TV show plus the user's annotations.
///
/// Field names serialize in camelCase so the persisted collection keeps the
/// `posterUrl` / `releaseYear` shape used by the stored JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub id: String,
    pub title: String,
    #[serde(default = "default_poster_url")]
    pub poster_url: String,
    #[serde(default = "default_release_year")]
    pub release_year: String,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default)]
    pub rating: Option<Rating>,
    #[serde(default)]
    pub watched: bool,
    #[serde(default)]
    pub watchlist: bool,
    /// Number of seasons (tv only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
}

fn default_poster_url() -> String {
    PLACEHOLDER_POSTER.to_string()
}

fn default_release_year() -> String {
    UNKNOWN_YEAR.to_string()
}

impl Content {
    /// Build an untracked record with default metadata; flags and rating unset.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_url: PLACEHOLDER_POSTER.to_string(),
            release_year: UNKNOWN_YEAR.to_string(),
            genre: Vec::new(),
            overview: String::new(),
            content_type,
            rating: None,
            watched: false,
            watchlist: false,
            seasons: None,
        }
    }

    pub fn with_rating(mut self, rating: Option<Rating>) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_genres(mut self, genre: Vec<String>) -> Self {
        self.genre = genre;
        self
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genre.iter().any(|g| g == genre)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Tv,
}

impl ContentType {
    /// Path segment used by the catalog endpoints (`movie/{id}`, `genre/tv/list`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Tv => "tv",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::Tv => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "movie" | "movies" => Ok(ContentType::Movie),
            "tv" | "show" | "shows" => Ok(ContentType::Tv),
            _ => Err(format!("Invalid content type: {}. Use 'movie' or 'tv'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_serializes_camel_case() {
        let content = Content::new("27205", "Inception", ContentType::Movie)
            .with_rating(Some(Rating::new(5).unwrap()));
        let value = serde_json::to_value(&content).unwrap();

        assert_eq!(value["posterUrl"], PLACEHOLDER_POSTER);
        assert_eq!(value["releaseYear"], UNKNOWN_YEAR);
        assert_eq!(value["type"], "movie");
        assert_eq!(value["rating"], 5);
        assert!(value.get("seasons").is_none());
    }

    #[test]
    fn test_content_deserializes_stored_shape() {
        let value = json!({
            "id": "1399",
            "title": "Game of Thrones",
            "posterUrl": "https://image.tmdb.org/t/p/w500/x.jpg",
            "releaseYear": "2011",
            "genre": ["Drama"],
            "overview": "",
            "type": "tv",
            "rating": null,
            "watched": false,
            "watchlist": true,
            "seasons": 8
        });
        let content: Content = serde_json::from_value(value).unwrap();
        assert_eq!(content.content_type, ContentType::Tv);
        assert_eq!(content.seasons, Some(8));
        assert!(content.watchlist);
        assert!(content.rating.is_none());
    }

    #[test]
    fn test_content_type_from_str() {
        assert_eq!("movie".parse::<ContentType>().unwrap(), ContentType::Movie);
        assert_eq!("TV".parse::<ContentType>().unwrap(), ContentType::Tv);
        assert!("person".parse::<ContentType>().is_err());
    }
}
