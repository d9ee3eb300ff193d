use clap::Subcommand;
use serde::Serialize;
use supermarket_auth_core::ExtractionResult;

pub mod completions;
pub mod info;
pub mod open;
pub mod providers;
pub mod redirect;
pub mod view;
pub mod watch;

// Re-export the command args structs
pub use completions::CompletionsArgs;
pub use info::InfoArgs;
pub use open::OpenArgs;
pub use providers::{ProvidersArgs, ShowArgs};
pub use redirect::MatchArgs;
pub use view::ViewArgs;
pub use watch::WatchArgs;

const PROVIDERS_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth providers               # Human readable list
  supermarket-auth providers --json        # Machine readable list"#;

const OPEN_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth open albert-heijn       # Open the Albert Heijn login page
  supermarket-auth open --print jumbo      # Only print the authorization URL"#;

const MATCH_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth match 'https://loyalty-app.jumbo.com/home?code=abc'
  supermarket-auth match --json 'appie://login-exit?code=abc'"#;

const WATCH_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth watch < navigations.log           # One URL per line
  echo 'will-redirect appie://login-exit?code=abc' | supermarket-auth watch --once
  supermarket-auth watch --json                      # JSON line per decision"#;

const INFO_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth info                    # Show config path and registry status"#;

const COMPLETIONS_EXAMPLES: &str = r#"EXAMPLES:
  supermarket-auth completions bash > ~/.bashrc
  supermarket-auth completions fish > ~/.config/fish/completions/supermarket-auth.fish"#;

#[derive(Subcommand)]
pub enum Commands {
    /// List supported supermarkets in matching order
    #[command(after_long_help = PROVIDERS_EXAMPLES)]
    Providers(ProvidersArgs),
    /// Show a single supermarket by id
    Show(ShowArgs),
    /// Open a supermarket's login page in the browser
    #[command(after_long_help = OPEN_EXAMPLES)]
    Open(OpenArgs),
    /// Extract the authorization code from a redirect URL
    #[command(after_long_help = MATCH_EXAMPLES)]
    Match(MatchArgs),
    /// Read navigation events from stdin and intercept login redirects
    #[command(after_long_help = WATCH_EXAMPLES)]
    Watch(WatchArgs),
    /// Render the page a result query resolves to
    View(ViewArgs),
    /// Show configuration and system information
    #[command(after_long_help = INFO_EXAMPLES)]
    Info(InfoArgs),
    /// Generate shell completions
    #[command(after_long_help = COMPLETIONS_EXAMPLES)]
    Completions(CompletionsArgs),
}

/// JSON shape of a captured code
#[derive(Debug, Serialize)]
pub struct CapturedCode<'a> {
    pub provider: &'a str,
    pub name: &'a str,
    pub code: &'a str,
}

impl<'a> From<&'a ExtractionResult<'a>> for CapturedCode<'a> {
    fn from(result: &'a ExtractionResult<'a>) -> Self {
        Self {
            provider: &result.provider.id,
            name: &result.provider.name,
            code: &result.code,
        }
    }
}
