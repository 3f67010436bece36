use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage slot for the tracked collection
pub const DEFAULT_STORAGE_KEY: &str = "watchedContent";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Upper bound on any single catalog request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many candidates the add flow offers from a search
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Overrides the data directory the collection is stored in
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_search_limit() -> usize {
    5
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_base_url: default_image_base_url(),
            timeout_secs: default_timeout_secs(),
            search_limit: default_search_limit(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("catalog.base_url", &self.catalog.base_url),
            ("catalog.image_base_url", &self.catalog.image_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.catalog.timeout_secs == 0 {
            return Err(anyhow::anyhow!("catalog.timeout_secs must be greater than zero"));
        }

        if self.catalog.search_limit == 0 {
            return Err(anyhow::anyhow!("catalog.search_limit must be greater than zero"));
        }

        if self.library.storage_key.trim().is_empty() {
            return Err(anyhow::anyhow!("library.storage_key cannot be empty"));
        }

        if self
            .library
            .storage_key
            .chars()
            .any(|c| c == '/' || c == '\\' || c == '.')
        {
            return Err(anyhow::anyhow!(
                "library.storage_key '{}' must be a plain name (no path separators or dots)",
                self.library.storage_key
            ));
        }

        Ok(())
    }

    /// Set a single value by dotted key, as used by `watchlog config set`
    pub fn set_value(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "catalog.base_url" => self.catalog.base_url = value.to_string(),
            "catalog.image_base_url" => self.catalog.image_base_url = value.to_string(),
            "catalog.timeout_secs" => {
                self.catalog.timeout_secs = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("catalog.timeout_secs expects a number, got '{}'", value))?
            }
            "catalog.search_limit" => {
                self.catalog.search_limit = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("catalog.search_limit expects a number, got '{}'", value))?
            }
            "library.storage_key" => self.library.storage_key = value.to_string(),
            "library.data_dir" => self.library.data_dir = Some(PathBuf::from(value)),
            _ => return Err(anyhow::anyhow!("Unknown config key: {}", key)),
        }
        self.validate()
    }
}
