use anyhow::Result;
use clap::Args;
use supermarket_auth_core::RedirectMatcher;

use crate::{
    args::CliConfig,
    commands::CapturedCode,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct MatchArgs {
    /// Candidate redirect URL
    #[arg(value_name = "URL")]
    pub url: String,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl MatchArgs {
    /// Exits with status 1 when no provider claims the URL.
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let matcher = RedirectMatcher::new(&cli_config.registry);

        let Some(result) = matcher.match_url(&self.url) else {
            output::warning("URL is not a login redirect of any supermarket", output_level);
            std::process::exit(1);
        };

        if self.json {
            println!("{}", serde_json::to_string(&CapturedCode::from(&result))?);
        } else {
            output::success(
                &format!("Captured code for {}", result.provider.name),
                output_level,
            );
            println!("{}", result.code);
        }

        Ok(())
    }
}
