pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{CatalogConfig, Config, LibraryConfig, DEFAULT_STORAGE_KEY};
pub use credentials::{CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, container_base_path};
