pub mod content;
pub mod details;
pub mod genre;
pub mod rating;
pub mod search;

pub use content::{Content, ContentType, PLACEHOLDER_POSTER, UNKNOWN_YEAR};
pub use details::ContentDetails;
pub use genre::Genre;
pub use rating::{Rating, RatingError};
pub use search::{SearchMediaType, SearchResult};
