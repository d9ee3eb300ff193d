use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use supermarket_auth_core::{ProviderRegistry, RegistryConfig};

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Provider used by `open` when none is given
    pub default_provider: Option<String>,
    /// Launch the system browser for `open` (otherwise only print the URL)
    pub open_browser: bool,
    /// Provider table
    pub registry: RegistryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: None,
            open_browser: true,
            registry: RegistryConfig::default(),
        }
    }
}

impl Config {
    /// Load the config file, writing the defaults first if it does not exist.
    pub fn load(config_path: &Path) -> Result<Config> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save(config_path)?;
            return Ok(default_config);
        }

        Self::read(config_path)
    }

    /// Read the config file without touching the filesystem. A missing file
    /// gives the defaults.
    pub fn read(config_path: &Path) -> Result<Config> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", config_path.display()))?;

        Ok(config)
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Build the validated provider registry described by this config
    pub fn registry(&self) -> Result<ProviderRegistry> {
        self.registry
            .clone()
            .into_registry()
            .context("Invalid provider registry in config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::load(&path).unwrap();
        assert!(path.exists());
        assert!(config.open_browser);
        assert!(config.default_provider.is_none());
        assert_eq!(config.registry().unwrap().len(), 2);

        // Reloading the written defaults gives the same result
        let reloaded = Config::load(&path).unwrap();
        assert!(reloaded.registry.include_builtin);
    }

    #[test]
    fn test_load_with_extra_provider() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
default_provider = "plus"
open_browser = false

[registry]
include_builtin = true

[[registry.providers]]
id = "plus"
name = "PLUS"
authorization_url = "https://www.plus.nl/inloggen"
redirect_prefix = "plus://callback"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.default_provider.as_deref(), Some("plus"));
        assert!(!config.open_browser);

        let registry = config.registry().unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_providers()[2].id, "plus");
    }

    #[test]
    fn test_invalid_registry_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[registry]\ninclude_builtin = false\n").unwrap();

        let config = Config::load(&path).unwrap();
        let err = config.registry().unwrap_err();
        assert!(err.to_string().contains("Invalid provider registry"));
    }

    #[test]
    fn test_read_missing_file_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let config = Config::read(&path).unwrap();
        assert!(config.open_browser);
        assert!(!path.exists());
        assert!(!temp_dir.path().join("nested").exists());
    }

    #[test]
    fn test_parse_error_has_context() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "open_browser = \"yes\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
