// Output format auto-detection for the CLI.
//
// TTY → human-readable text. Piped/redirected → structured JSON.
// `--json` flag forces JSON output regardless of terminal.

use serde::Serialize;
use std::io::{self, IsTerminal, Write};

use crate::exit_code::{command_error, BRANCH_NOT_FOUND, DOCUMENT_NOT_FOUND, STORAGE_ERROR};

const ANSI_RED: &str = "\x1b[31m";
const ANSI_YELLOW: &str = "\x1b[33m";
const ANSI_RESET: &str = "\x1b[0m";

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    /// One JSON object per line.
    Json,
}

impl OutputFormat {
    /// JSON if `--json` was passed or stdout is not a TTY.
    pub fn detect(json_flag: bool) -> Self {
        Self::resolve(json_flag, io::stdout().is_terminal())
    }

    pub fn resolve(json_flag: bool, stdout_is_tty: bool) -> Self {
        if json_flag || !stdout_is_tty {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Write a command result to stdout.
pub fn print_output<T, F>(format: OutputFormat, value: &T, human_fn: F) -> io::Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    write_output(&mut io::stdout().lock(), format, value, human_fn)
}

/// Write a command result to `writer`; `human_fn` is only called for text output.
pub fn write_output<W, T, F>(
    writer: &mut W,
    format: OutputFormat,
    value: &T,
    human_fn: F,
) -> io::Result<()>
where
    W: Write,
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Human => writeln!(writer, "{}", human_fn(value)),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *writer, value).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Error,
    Warning,
}

impl Severity {
    fn label(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }

    fn color(self) -> &'static str {
        match self {
            Self::Error => ANSI_RED,
            Self::Warning => ANSI_YELLOW,
        }
    }
}

pub fn print_error(format: OutputFormat, code: &str, message: &str) {
    print_diagnostic(format, Severity::Error, code, message);
}

/// Warnings never change the exit code.
pub fn print_warning(format: OutputFormat, code: &str, message: &str) {
    print_diagnostic(format, Severity::Warning, code, message);
}

fn print_diagnostic(format: OutputFormat, severity: Severity, code: &str, message: &str) {
    let is_tty = io::stderr().is_terminal();
    // stderr is best effort; there is nowhere left to report a failed write.
    let _ = write_diagnostic(&mut io::stderr().lock(), format, severity, code, message, is_tty);
}

fn write_diagnostic<W: Write>(
    writer: &mut W,
    format: OutputFormat,
    severity: Severity,
    code: &str,
    message: &str,
    is_tty: bool,
) -> io::Result<()> {
    match format {
        OutputFormat::Human => {
            let label = severity.label();
            if is_tty {
                writeln!(writer, "{}{label}:{ANSI_RESET} {message}", severity.color())
            } else {
                writeln!(writer, "{label}: {message}")
            }
        }
        OutputFormat::Json => {
            let body = serde_json::json!({ "code": code, "message": message });
            let mut envelope = serde_json::Map::new();
            envelope.insert(severity.label().to_string(), body);
            serde_json::to_writer(&mut *writer, &envelope).map_err(io::Error::other)?;
            writeln!(writer)
        }
    }
}

/// Print a mapped, actionable error for a command failure.
pub fn print_anyhow_error(format: OutputFormat, error: &anyhow::Error) {
    let (code, message) = actionable_error(error);
    print_error(format, code, &message);
}

fn actionable_error(error: &anyhow::Error) -> (&'static str, String) {
    if let Some(command_err) = command_error(error) {
        let message = match command_err.code {
            DOCUMENT_NOT_FOUND => {
                let doc_id = extract_quoted_name(&command_err.message)
                    .unwrap_or_else(|| "<id>".to_string());
                format!(
                    "Document {doc_id} not found. Run: collabwrite ls to see available documents"
                )
            }
            BRANCH_NOT_FOUND => format!(
                "{}. Run: collabwrite branch <doc> to see available branches",
                command_err.message
            ),
            STORAGE_ERROR => {
                format!("{error:#}. Check --storage or storage_path in ~/.collabwrite/config.toml")
            }
            _ => command_err.message.clone(),
        };
        return (command_err.code, message);
    }

    let message = format!("{error:#}");
    let lower = message.to_ascii_lowercase();

    if lower.contains("timed out") {
        return (
            "NETWORK_TIMEOUT",
            "Could not reach the suggestion service. \
             Check [ai].endpoint in ~/.collabwrite/config.toml"
                .to_string(),
        );
    }

    if lower.contains("permission denied") {
        return (STORAGE_ERROR, message);
    }

    ("ERROR", message)
}

fn extract_quoted_name(message: &str) -> Option<String> {
    let mut parts = message.split('`');
    let _before = parts.next()?;
    let candidate = parts.next()?.trim();
    if candidate.is_empty() {
        None
    } else {
        Some(candidate.to_string())
    }
}
