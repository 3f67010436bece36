use thiserror::Error;
use watchlog_catalog::CatalogError;
use watchlog_models::{ContentType, RatingError};

/// Caller contract violations rejected at the library boundary
#[derive(Debug, Error, PartialEq)]
pub enum LibraryError {
    #[error("content is missing required field '{0}'")]
    MissingField(&'static str),

    #[error(transparent)]
    InvalidRating(#[from] RatingError),

    #[error("'{0}' is a person, not a movie or show")]
    NotTrackable(String),

    #[error("content '{id}' is a {existing} and cannot become a {requested}")]
    TypeChanged {
        id: String,
        existing: ContentType,
        requested: ContentType,
    },
}

/// Failure to produce details for a title on the details view
#[derive(Debug, Error)]
pub enum DetailsError {
    /// The id is already tracked under the other content type
    #[error("'{id}' is tracked as a {tracked}, not a {requested}")]
    TypeMismatch {
        id: String,
        tracked: ContentType,
        requested: ContentType,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl DetailsError {
    /// Text safe to show to a user on the details view
    pub fn user_message(&self) -> String {
        match self {
            DetailsError::TypeMismatch { .. } => self.to_string(),
            DetailsError::Catalog(e) => e.user_message(),
        }
    }
}
