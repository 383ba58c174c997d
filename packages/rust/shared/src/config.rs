//! Application configuration for Awesauce.
//!
//! User config lives at `~/.awesauce/awesauce.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AwesauceError, Result};

/// Content API used when none is configured.
pub const DEFAULT_API: &str = "https://data.mongodb-api.com/app/awesauce-cms-aesdg/endpoint/cms";

/// Hostname used to select a site when none is configured.
pub const DEFAULT_HOST: &str = "apellean.com";

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "awesauce.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".awesauce";

// ---------------------------------------------------------------------------
// Config structs (matching awesauce.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Content API settings.
    #[serde(default)]
    pub cms: CmsConfig,
}

/// `[cms]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Base URL of the content API (no trailing slash).
    #[serde(default = "default_api")]
    pub api: String,

    /// Hostname the site is selected by.
    #[serde(default = "default_host")]
    pub host: String,

    /// Brand slug, when content should be scoped by brand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    /// Tenant within the brand. Normally learned from the site response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            host: default_host(),
            brand: None,
            tenant: None,
        }
    }
}

fn default_api() -> String {
    DEFAULT_API.into()
}
fn default_host() -> String {
    DEFAULT_HOST.into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.awesauce/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| AwesauceError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.awesauce/awesauce.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AwesauceError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| AwesauceError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| AwesauceError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| AwesauceError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| AwesauceError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
