use anyhow::Result;
use clap::Args;
use supermarket_auth_core::View;

use crate::{
    args::CliConfig,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct ViewArgs {
    /// Result query, e.g. `supermarket-id=jumbo&supermarket-code=abc`
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,
}

impl ViewArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let view = match self.query.as_deref() {
            Some(query) => View::from_query_string(&cli_config.registry, query),
            None => View::resolve(&cli_config.registry, None),
        };

        match view {
            View::Result { provider, code } => {
                output::heading(
                    &format!("Logged in at {}", provider.name),
                    output_level,
                );
                println!("{code}");
            }
            View::Listing(providers) => {
                if self.query.is_some() {
                    output::warning(
                        "Result query is incomplete or names an unknown supermarket",
                        output_level,
                    );
                }

                output::heading("Supermarket Authenticator", output_level);
                for provider in providers {
                    println!(
                        "{}\t{}",
                        output::format_provider(&provider.name),
                        output::format_url(&provider.authorization_url)
                    );
                }
            }
        }

        Ok(())
    }
}
