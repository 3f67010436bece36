use crate::content::{Content, ContentType};
use crate::rating::Rating;
use serde::{Deserialize, Serialize};

/// Full metadata for one catalog title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentDetails {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub release_year: String,
    pub genre: Vec<String>,
    pub overview: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<u32>,
}

impl ContentDetails {
    pub fn into_content(self, rating: Option<Rating>, watched: bool, watchlist: bool) -> Content {
        Content {
            id: self.id,
            title: self.title,
            poster_url: self.poster_url,
            release_year: self.release_year,
            genre: self.genre,
            overview: self.overview,
            content_type: self.content_type,
            rating,
            watched,
            watchlist,
            seasons: self.seasons,
        }
    }
}
