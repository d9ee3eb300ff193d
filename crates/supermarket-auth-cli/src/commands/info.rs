use anyhow::Result;
use clap::Args;

use crate::{
    args::CliConfig,
    constants::LOG_ENV_VAR,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct InfoArgs {
    // Info command has no arguments
}

impl InfoArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let registry_config = &cli_config.config.registry;

        output::note(
            &format!("config file: {}", cli_config.config_path.display()),
            output_level,
        );

        output::heading("\nRegistry:", output_level);
        output::note(
            &format!("providers: {}", cli_config.registry.len()),
            output_level,
        );
        output::note(
            &format!("built-in providers: {}", registry_config.include_builtin),
            output_level,
        );
        output::note(
            &format!("custom providers: {}", registry_config.providers.len()),
            output_level,
        );
        output::note(
            &format!(
                "default provider: {}",
                cli_config
                    .config
                    .default_provider
                    .as_deref()
                    .unwrap_or("None")
            ),
            output_level,
        );

        output::heading("\nEnv Vars:", output_level);
        output::note(
            &format!(
                "{LOG_ENV_VAR} = {}",
                std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| "None".to_string())
            ),
            output_level,
        );

        output::heading("\nVersion info:", output_level);
        output::note(
            &format!("version: {}", env!("CARGO_PKG_VERSION")),
            output_level,
        );

        Ok(())
    }
}
