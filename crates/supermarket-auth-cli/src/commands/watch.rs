//! A line-oriented navigation host.
//!
//! Each stdin line is a pending navigation. The decision for a line is
//! written and flushed before the next line is read, so whoever drives the
//! webview can hold the navigation until the answer arrives.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;
use supermarket_auth_core::{
    NavigationDecision, NavigationEvent, NavigationKind, RedirectMatcher, ResultQuery, intercept,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::{
    args::CliConfig,
    commands::CapturedCode,
    output::{self, OutputLevel},
};

#[derive(Args)]
pub struct WatchArgs {
    /// Write one JSON object per decision
    #[arg(long)]
    pub json: bool,

    /// Stop after the first intercepted redirect
    #[arg(long)]
    pub once: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    pub json: bool,
    pub once: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct WatchSummary {
    pub events: usize,
    pub intercepted: usize,
    /// Lines dropped because they were not valid UTF-8
    pub skipped: usize,
}

#[derive(Serialize)]
struct DecisionRecord<'a> {
    timestamp: DateTime<Utc>,
    kind: String,
    url: &'a str,
    decision: &'static str,
    #[serde(flatten)]
    captured: Option<CapturedCode<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_query: Option<String>,
}

impl WatchArgs {
    pub async fn run(&self, output_level: OutputLevel, cli_config: &CliConfig) -> Result<()> {
        let matcher = RedirectMatcher::new(&cli_config.registry);
        let options = WatchOptions {
            json: self.json,
            once: self.once,
        };

        if atty::is(atty::Stream::Stdin) {
            output::note(
                "Reading navigations from stdin, one URL per line (Ctrl-D to stop)",
                output_level,
            );
        }

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        let summary = watch_events(stdin, &mut stdout, &matcher, options).await?;

        if summary.intercepted == 0 {
            output::warning(
                &format!("No login redirect among {} navigations", summary.events),
                output_level,
            );
        } else {
            output::success(
                &format!(
                    "Intercepted {} of {} navigations",
                    summary.intercepted, summary.events
                ),
                output_level,
            );
        }

        Ok(())
    }
}

/// Parse one input line into a navigation event.
///
/// Accepts `<url>` or `<will-navigate|will-redirect> <url>`. Blank lines and
/// `#` comments yield `None`.
pub fn parse_navigation_line(line: &str) -> Option<NavigationEvent> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if let Some((head, rest)) = line.split_once(char::is_whitespace) {
        if let Ok(kind) = NavigationKind::from_str(head) {
            let url = rest.trim();
            if !url.is_empty() {
                return Some(NavigationEvent::new(kind, url));
            }
        }
    }

    Some(NavigationEvent::will_navigate(line))
}

pub async fn watch_events<R, W>(
    reader: R,
    out: &mut W,
    matcher: &RedirectMatcher<'_>,
    options: WatchOptions,
) -> Result<WatchSummary>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut summary = WatchSummary::default();
    let mut reader = reader;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read navigation event")?;
        if read == 0 {
            break;
        }

        // A line that is not UTF-8 cannot be a URL; it must not stop the host
        let Ok(line) = std::str::from_utf8(&buf) else {
            tracing::warn!(bytes = read, "skipping navigation line that is not valid UTF-8");
            summary.skipped += 1;
            continue;
        };
        let Some(event) = parse_navigation_line(line) else {
            continue;
        };
        summary.events += 1;

        let decision = intercept(matcher, &event);
        write_decision(out, &event, &decision, options.json)?;

        if decision.is_intercept() {
            summary.intercepted += 1;
            if options.once {
                break;
            }
        }
    }

    tracing::debug!(
        events = summary.events,
        intercepted = summary.intercepted,
        skipped = summary.skipped,
        "navigation stream finished"
    );
    Ok(summary)
}

fn write_decision<W: Write>(
    out: &mut W,
    event: &NavigationEvent,
    decision: &NavigationDecision<'_>,
    json: bool,
) -> Result<()> {
    let (captured, result_query) = match decision {
        NavigationDecision::Intercept(result) => (
            Some(CapturedCode::from(result)),
            Some(ResultQuery::from(result).to_query_string()?),
        ),
        NavigationDecision::Proceed => (None, None),
    };
    let verdict = if decision.is_intercept() {
        "intercept"
    } else {
        "proceed"
    };

    if json {
        let record = DecisionRecord {
            timestamp: Utc::now(),
            kind: event.kind.to_string(),
            url: &event.url,
            decision: verdict,
            captured,
            result_query,
        };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    } else {
        match result_query {
            Some(query) => writeln!(out, "{verdict}\t{}\t{}\t?{query}", event.kind, event.url)?,
            None => writeln!(out, "{verdict}\t{}\t{}", event.kind, event.url)?,
        }
    }

    out.flush().context("Failed to write decision")?;
    Ok(())
}
