pub mod error;
pub mod intake;
pub mod library;
pub mod storage;
pub mod views;

pub use error::{DetailsError, LibraryError};
pub use intake::{content_from_selection, manual_content, resolve_details, select_candidates, tracked_copy};
pub use library::LibraryStore;
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use views::{all_genres, filter, TypeCounts, View, ViewFilter};
