use crate::error::CatalogError;
use tracing::{debug, warn};

/// Result of one catalog call before it is collapsed for callers.
///
/// Public adapter methods never surface failures; they turn `Empty` and
/// `TransientFailure` into an empty list or `None`, logging the failure.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    Success(T),
    Empty,
    TransientFailure(CatalogError),
}

impl<T> FetchOutcome<T> {
    /// Single-item lookup: a 404 from the catalog means "nothing there", not a failure
    pub fn from_lookup(result: Result<T, CatalogError>) -> Self {
        match result {
            Ok(value) => FetchOutcome::Success(value),
            Err(e) if e.is_not_found() => FetchOutcome::Empty,
            Err(e) => FetchOutcome::TransientFailure(e),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn into_option(self, operation: &str) -> Option<T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            FetchOutcome::Empty => {
                debug!(operation, "Catalog returned nothing");
                None
            }
            FetchOutcome::TransientFailure(e) => {
                warn!(operation, error = %e, "Catalog request failed");
                None
            }
        }
    }
}

impl<T> FetchOutcome<Vec<T>> {
    pub fn from_list(result: Result<Vec<T>, CatalogError>) -> Self {
        match result {
            Ok(items) if items.is_empty() => FetchOutcome::Empty,
            Ok(items) => FetchOutcome::Success(items),
            Err(e) => FetchOutcome::TransientFailure(e),
        }
    }

    pub fn into_vec(self, operation: &str) -> Vec<T> {
        self.into_option(operation).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_collapse() {
        let ok: FetchOutcome<Vec<u32>> = FetchOutcome::from_list(Ok(vec![1, 2]));
        assert!(ok.is_success());
        assert_eq!(ok.into_vec("test"), vec![1, 2]);

        let empty: FetchOutcome<Vec<u32>> = FetchOutcome::from_list(Ok(vec![]));
        assert!(matches!(empty, FetchOutcome::Empty));

        let failed: FetchOutcome<Vec<u32>> = FetchOutcome::from_list(Err(CatalogError::Api {
            status: 500,
            message: "boom".to_string(),
        }));
        assert!(failed.into_vec("test").is_empty());
    }

    #[test]
    fn test_lookup_not_found_is_empty() {
        let outcome: FetchOutcome<u32> = FetchOutcome::from_lookup(Err(CatalogError::Api {
            status: 404,
            message: "The resource you requested could not be found.".to_string(),
        }));
        assert!(matches!(outcome, FetchOutcome::Empty));
        assert_eq!(outcome.into_option("test"), None);
    }
}
