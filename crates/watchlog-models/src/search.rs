use crate::content::ContentType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Media type tag on a multi-search hit. Unlike [`ContentType`] this includes
/// people, which the catalog returns alongside titles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchMediaType {
    Movie,
    Tv,
    Person,
}

impl SearchMediaType {
    /// Trackable content type, or `None` for people
    pub fn content_type(self) -> Option<ContentType> {
        match self {
            SearchMediaType::Movie => Some(ContentType::Movie),
            SearchMediaType::Tv => Some(ContentType::Tv),
            SearchMediaType::Person => None,
        }
    }
}

impl From<ContentType> for SearchMediaType {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Movie => SearchMediaType::Movie,
            ContentType::Tv => SearchMediaType::Tv,
        }
    }
}

impl fmt::Display for SearchMediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchMediaType::Movie => "movie",
            SearchMediaType::Tv => "tv",
            SearchMediaType::Person => "person",
        };
        f.write_str(s)
    }
}

/// Normalized catalog search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub poster_url: String,
    pub release_year: String,
    #[serde(rename = "type")]
    pub media_type: SearchMediaType,
    pub overview: String,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl SearchResult {
    pub fn is_person(&self) -> bool {
        self.media_type == SearchMediaType::Person
    }
}
