pub mod error;
pub mod outcome;
pub mod sequence;
pub mod tmdb;
pub mod traits;

pub use error::CatalogError;
pub use outcome::FetchOutcome;
pub use sequence::{SearchSequencer, SearchTicket, TrackedSearch};
pub use tmdb::TmdbClient;
pub use traits::{genre_names, CatalogSource};
