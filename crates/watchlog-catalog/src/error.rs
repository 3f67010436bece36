use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog API key is not configured")]
    MissingApiKey,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response; `message` is the catalog's own `status_message`
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("malformed catalog response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog record rejected: {0}")]
    InvalidRecord(String),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::Api { status: 404, .. })
    }

    /// Text safe to show to a user on the details view
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Api { message, .. } => message.clone(),
            CatalogError::Http(e) if e.is_timeout() => "The catalog took too long to respond".to_string(),
            CatalogError::MissingApiKey => self.to_string(),
            _ => "Failed to fetch content details".to_string(),
        }
    }
}
