use anyhow::{Context, Result};
use etcetera::BaseStrategy;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::CompletionCandidate;
use supermarket_auth_core::ProviderRegistry;

use crate::commands::Commands;
use crate::config::Config;
use crate::constants::{BINARY_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

// Example strings for after_long_help
const CLI_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth providers                                  # List supported supermarkets
  supermarket-auth open jumbo                                 # Start the Jumbo login in a browser
  supermarket-auth match 'appie://login-exit?code=abc'        # Extract a code from a redirect URL
  supermarket-auth watch --once < navigations.log             # Intercept a stream of navigations
  supermarket-auth view 'supermarket-id=jumbo&supermarket-code=abc'"#;

pub struct CliConfig {
    pub config_path: PathBuf,
    pub config: Config,
    pub registry: ProviderRegistry,
}

impl CliConfig {
    pub fn load(config_override: Option<&Path>) -> Result<Self> {
        let config_path = match config_override {
            Some(path) => path.to_path_buf(),
            None => default_config_path()?,
        };

        let config = Config::load(&config_path)?;
        let registry = config.registry()?;
        tracing::debug!(
            path = %config_path.display(),
            providers = registry.len(),
            "loaded configuration"
        );

        Ok(Self {
            config_path,
            config,
            registry,
        })
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let strategy =
        etcetera::choose_base_strategy().context("Unable to determine config directory")?;
    Ok(strategy.config_dir().join(BINARY_NAME).join(CONFIG_FILE_NAME))
}

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Capture supermarket login codes from redirect URLs")]
#[command(name = BINARY_NAME)]
#[command(after_long_help = CLI_EXAMPLES)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true, env = CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Quiet output (only show errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Complete provider ids from the configured registry.
///
/// Completion runs before argument parsing, so only the environment override
/// is visible here, not `--config`.
pub fn provider_completer(current: &OsStr) -> Vec<CompletionCandidate> {
    let cur_str = current.to_string_lossy();

    let config_path = match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) => Some(PathBuf::from(path)),
        None => default_config_path().ok(),
    };
    let registry = match config_path {
        Some(path) => completion_registry(&path),
        None => ProviderRegistry::builtin().clone(),
    };

    registry
        .iter()
        .filter(|p| p.id.starts_with(cur_str.as_ref()))
        .map(|p| CompletionCandidate::new(p.id.clone()).help(Some(p.name.clone().into())))
        .collect()
}

/// Registry for completion: never writes a config file, and falls back to the
/// built-in table when the config cannot be used.
fn completion_registry(config_path: &Path) -> ProviderRegistry {
    Config::read(config_path)
        .and_then(|config| config.registry())
        .unwrap_or_else(|err| {
            tracing::debug!(error = %err, "using built-in providers for completion");
            ProviderRegistry::builtin().clone()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "supermarket-auth",
            "providers",
            "--quiet",
            "--config",
            "/tmp/x.toml",
        ])
        .unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }

    #[test]
    fn test_cli_config_load_with_override() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let cli_config = CliConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(cli_config.config_path, path);
        assert_eq!(&cli_config.registry, ProviderRegistry::builtin());
    }

    #[test]
    fn test_completion_registry_does_not_create_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let registry = completion_registry(&path);
        assert_eq!(&registry, ProviderRegistry::builtin());
        assert!(!path.exists());
    }

    #[test]
    fn test_completion_registry_reads_configured_providers() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[[registry.providers]]
id = "plus"
name = "PLUS"
authorization_url = "https://www.plus.nl/inloggen"
redirect_prefix = "plus://callback"
"#,
        )
        .unwrap();

        let registry = completion_registry(&path);
        assert_eq!(registry.len(), 3);
        assert!(registry.find_by_id("plus").is_some());
    }

    #[test]
    fn test_completion_registry_falls_back_on_invalid_config() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[registry]\ninclude_builtin = false\n").unwrap();

        assert_eq!(&completion_registry(&path), ProviderRegistry::builtin());
    }
}
