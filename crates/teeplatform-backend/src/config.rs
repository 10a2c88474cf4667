use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use teeplatform_bridge::config::Config;
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

/// Errors that can occur while loading or resolving application configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to determine the user's configuration directory. This usually
    /// occurs when required environment variables are missing (e.g., `$HOME`
    /// on Unix or `%APPDATA%` on Windows).
    #[error("failed to obtain user's directories")]
    DirectoriesNotFound,
    /// An I/O error occurred while reading or writing the configuration file.
    #[error("failed to read config: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid TOML or does not match the expected structure.
    #[error("failed to deserialize config: {0}")]
    DeserializeError(#[from] toml::de::Error),
    /// Failed to serialize the configuration to TOML (e.g., when saving changes).
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Location of `config.toml` in the user's configuration directory.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "teespace", "teeplatform")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .ok_or(ConfigError::DirectoriesNotFound)
}

/// Loads the configuration at `config_path`, writing the defaults there first
/// if the file does not exist yet.
pub async fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    log::info!("Loading configuration from {config_path:?}");
    if config_path.exists() {
        let contents = read_to_string(config_path).await?;
        let config: Config = toml::from_str(&contents)?;
        return Ok(config);
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let contents = toml::to_string_pretty(&config)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(config_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(config)
}

/// Serializes `config` to pretty-printed TOML and writes it to `config_path`,
/// overwriting any existing file.
pub async fn save_config(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        create_dir_all(parent).await?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(config_path)
        .await?;

    let contents = toml::to_string_pretty(&config)?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}
