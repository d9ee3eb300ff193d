use anyhow::{Context, Result};
use clap::Args;
use clap_complete::engine::ArgValueCompleter;

use crate::{
    args::{CliConfig, provider_completer},
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct OpenArgs {
    /// Provider id; defaults to `default_provider` from the config
    #[arg(add = ArgValueCompleter::new(provider_completer))]
    pub id: Option<String>,

    /// Print the authorization URL instead of launching a browser
    #[arg(long)]
    pub print: bool,
}

impl OpenArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let Some(id) = self
            .id
            .as_deref()
            .or(cli_config.config.default_provider.as_deref())
        else {
            output::error_with_suggestion(
                "No supermarket given",
                &format!(
                    "Pass an id or set default_provider in {}",
                    cli_config.config_path.display()
                ),
                output_level,
            );
            std::process::exit(1);
        };

        let provider = cli_config
            .registry
            .find_by_id(id)
            .with_context(|| format!("Unknown supermarket '{id}'"))?;

        if self.print || !cli_config.config.open_browser {
            println!("{}", provider.authorization_url);
            return Ok(());
        }

        output::note(
            &format!(
                "Opening {} login: {}",
                output::format_provider(&provider.name),
                output::format_url(&provider.authorization_url)
            ),
            output_level,
        );
        webbrowser::open(&provider.authorization_url).context("Failed to open browser")?;
        output::note(
            &format!(
                "Feed the redirects to {} to capture the code.",
                output::format_command("supermarket-auth watch")
            ),
            output_level,
        );

        Ok(())
    }
}
