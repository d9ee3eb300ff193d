use anyhow::Result;
use clap::Args;
use clap_complete::engine::ArgValueCompleter;
use supermarket_auth_core::ProviderDescriptor;

use crate::{
    args::{CliConfig, provider_completer},
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct ProvidersArgs {
    /// Print the provider table as JSON
    #[arg(long)]
    pub json: bool,
}

impl ProvidersArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let providers = cli_config.registry.list_providers();

        if self.json {
            println!("{}", serde_json::to_string_pretty(providers)?);
            return Ok(());
        }

        output::heading("Supermarkets (matched in this order):", output_level);
        for (i, provider) in providers.iter().enumerate() {
            println!(
                "{}. {} ({})",
                i + 1,
                output::format_provider(&provider.name),
                provider.id
            );
            print_details(provider);
        }

        Ok(())
    }
}

#[derive(Args)]
pub struct ShowArgs {
    /// Provider id (e.g. albert-heijn, jumbo)
    #[arg(add = ArgValueCompleter::new(provider_completer))]
    pub id: String,

    /// Print the provider as JSON
    #[arg(long)]
    pub json: bool,
}

impl ShowArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let Some(provider) = cli_config.registry.find_by_id(&self.id) else {
            output::error_with_suggestion(
                &format!("Unknown supermarket '{}'", self.id),
                &format!(
                    "Run {} to see the available ids",
                    output::format_command("supermarket-auth providers")
                ),
                output_level,
            );
            std::process::exit(1);
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(provider)?);
        } else {
            println!("{}", output::format_provider(&provider.name));
            print_details(provider);
        }

        Ok(())
    }
}

fn print_details(provider: &ProviderDescriptor) {
    println!(
        "   login:    {}",
        output::format_url(&provider.authorization_url)
    );
    println!("   redirect: {}", provider.redirect_prefix);
    println!("   code:     ?{}=", provider.code_param);
}
