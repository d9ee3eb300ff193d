use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory, ValueEnum};
use clap_complete::{generate, shells};

use crate::{args::Cli, constants::BINARY_NAME};

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Clone, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

impl CompletionsArgs {
    /// Needs no configuration, so it runs before the config is loaded.
    pub async fn run(&self) -> Result<()> {
        let mut cmd = Cli::command();
        let mut out = io::stdout();

        match self.shell {
            Shell::Bash => generate(shells::Bash, &mut cmd, BINARY_NAME, &mut out),
            Shell::Zsh => generate(shells::Zsh, &mut cmd, BINARY_NAME, &mut out),
            Shell::Fish => generate(shells::Fish, &mut cmd, BINARY_NAME, &mut out),
            Shell::PowerShell => generate(shells::PowerShell, &mut cmd, BINARY_NAME, &mut out),
            Shell::Elvish => generate(shells::Elvish, &mut cmd, BINARY_NAME, &mut out),
        }
        Ok(())
    }
}
