//! User-facing messages and logging setup
//!
//! Messages go to stderr so that stdout only carries command results
//! (codes, URLs, JSON).

use owo_colors::OwoColorize;
use std::env;
use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

/// How much the CLI says besides its results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputLevel {
    Normal,
    /// Only errors and hints
    Quiet,
    /// Normal output plus debug logging
    Verbose,
}

impl OutputLevel {
    pub fn show_user(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    fn default_log_directive(&self) -> &'static str {
        match self {
            Self::Verbose => "debug",
            Self::Normal | Self::Quiet => "warn",
        }
    }
}

/// Install the tracing subscriber. `log` records from the core library are
/// forwarded into it.
pub fn init_logging(output_level: OutputLevel) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(output_level.default_log_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color())
        .with_target(false)
        .try_init();
}

fn use_color() -> bool {
    env::var_os("NO_COLOR").is_none()
        && !env::var("TERM").is_ok_and(|t| t == "dumb")
        && atty::is(atty::Stream::Stderr)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Note,
    Heading,
    Success,
    Warning,
    Error,
    Hint,
}

impl Tone {
    /// Errors and hints are printed even in quiet mode
    fn always_shown(self) -> bool {
        matches!(self, Self::Error | Self::Hint)
    }

    fn label(self) -> Option<&'static str> {
        match self {
            Self::Warning => Some("Warning:"),
            Self::Error => Some("Error:"),
            Self::Hint => Some("Hint:"),
            Self::Note | Self::Heading | Self::Success => None,
        }
    }

    fn render(self, msg: &str, color: bool) -> String {
        if !color {
            return match self.label() {
                Some(label) => format!("{label} {msg}"),
                None => msg.to_string(),
            };
        }

        match (self, self.label()) {
            (Self::Note, _) => msg.to_string(),
            (Self::Heading, _) => msg.bold().to_string(),
            (Self::Success, _) => msg.green().to_string(),
            (Self::Warning, Some(label)) => format!("{} {}", label.yellow().bold(), msg.yellow()),
            (Self::Error, Some(label)) => format!("{} {}", label.red().bold(), msg.red()),
            (Self::Hint, Some(label)) => format!("{} {}", label.blue().bold(), msg.blue()),
            (_, None) => msg.to_string(),
        }
    }
}

fn emit(tone: Tone, msg: &str, output_level: OutputLevel) {
    if tone.always_shown() || output_level.show_user() {
        eprintln!("{}", tone.render(msg, use_color()));
    }
}

pub fn heading(msg: &str, output_level: OutputLevel) {
    emit(Tone::Heading, msg, output_level);
}

pub fn note(msg: &str, output_level: OutputLevel) {
    emit(Tone::Note, msg, output_level);
}

pub fn success(msg: &str, output_level: OutputLevel) {
    emit(Tone::Success, msg, output_level);
}

pub fn warning(msg: &str, output_level: OutputLevel) {
    emit(Tone::Warning, msg, output_level);
}

/// Report a failure together with what the user can do about it
pub fn error_with_suggestion(msg: &str, suggestion: &str, output_level: OutputLevel) {
    emit(Tone::Error, msg, output_level);
    emit(Tone::Hint, suggestion, output_level);
}

pub fn format_provider(provider: &str) -> String {
    if use_color() {
        provider.magenta().bold().to_string()
    } else {
        provider.to_string()
    }
}

pub fn format_url(url: &str) -> String {
    if use_color() {
        url.cyan().underline().to_string()
    } else {
        url.to_string()
    }
}

/// Backtick-quoted, so the command stands out without color too
pub fn format_command(cmd: &str) -> String {
    if use_color() {
        format!("`{}`", cmd.yellow().bold())
    } else {
        format!("`{cmd}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_levels() {
        assert!(OutputLevel::Normal.show_user());
        assert!(OutputLevel::Verbose.show_user());
        assert!(!OutputLevel::Quiet.show_user());

        assert_eq!(OutputLevel::Verbose.default_log_directive(), "debug");
        assert_eq!(OutputLevel::Quiet.default_log_directive(), "warn");
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(Tone::Note.render("hello", false), "hello");
        assert_eq!(Tone::Heading.render("Providers", false), "Providers");
        assert_eq!(Tone::Warning.render("careful", false), "Warning: careful");
        assert_eq!(Tone::Error.render("failed", false), "Error: failed");
        assert_eq!(Tone::Hint.render("try again", false), "Hint: try again");
    }

    #[test]
    fn test_colored_rendering_keeps_text() {
        let rendered = Tone::Error.render("failed", true);
        assert!(rendered.contains("Error:"));
        assert!(rendered.contains("failed"));
        assert_ne!(rendered, "Error: failed");
    }

    #[test]
    fn test_quiet_mode_keeps_errors() {
        assert!(Tone::Error.always_shown());
        assert!(Tone::Hint.always_shown());
        assert!(!Tone::Warning.always_shown());
        assert!(!Tone::Success.always_shown());
    }
}
