use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::path::PathBuf;
use tracing::debug;
use watchlog_catalog::TmdbClient;
use watchlog_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use watchlog_core::{FileStorage, LibraryStore};

/// Paths and config shared by every command
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
        Ok(Self { paths, config })
    }

    pub fn data_dir(&self) -> PathBuf {
        self.config
            .library
            .data_dir
            .clone()
            .unwrap_or_else(|| self.paths.data_dir().to_path_buf())
    }

    pub fn open_library(&self) -> LibraryStore<FileStorage> {
        let dir = self.data_dir();
        debug!(dir = %dir.display(), key = %self.config.library.storage_key, "Opening library");
        LibraryStore::open(FileStorage::new(dir), self.config.library.storage_key.clone())
    }

    pub fn credentials(&self) -> Result<CredentialStore> {
        let mut store = CredentialStore::new(self.paths.credentials_file());
        store
            .load()
            .map_err(|e| eyre!("Failed to load credentials: {}", e))?;
        Ok(store)
    }

    pub fn catalog(&self) -> Result<TmdbClient> {
        let api_key = self.credentials()?.resolve_api_key().ok_or_else(|| {
            eyre!(
                "No TMDB API key configured. Run 'watchlog config api-key' or set {}",
                API_KEY_ENV
            )
        })?;
        TmdbClient::new(api_key, &self.config.catalog).map_err(|e| eyre!("Failed to create catalog client: {}", e))
    }
}
