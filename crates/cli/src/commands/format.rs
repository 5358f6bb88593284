// `collabwrite format`: apply a toolbar action to a selection of the
// active branch.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::format::{FormatCommand, Selection};

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, INVALID_ARGUMENT};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// bold, italic, underline, strike, paragraph, ul, ol, font, size.
    pub command: String,

    /// Font family for `font`, 1-7 step or px size for `size`.
    pub value: Option<String>,

    /// Selection start, in characters.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Selection end, in characters (defaults to `--start`).
    #[arg(long)]
    end: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatResult {
    pub doc_id: String,
    pub branch: String,
    pub command: FormatCommand,
    pub applied: bool,
    /// Selection over the formatted text after the splice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
    pub content: String,
}

pub fn run(args: FormatArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let command = match FormatCommand::parse(&args.command, args.value.as_deref()) {
        Ok(command) => command,
        Err(error) => {
            let error = anyhow::Error::new(CommandError::new(INVALID_ARGUMENT, error.to_string()));
            output::print_anyhow_error(format, &error);
            return Err(error);
        }
    };
    let selection = Selection::new(args.start, args.end.unwrap_or(args.start));

    let result = super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, selection, command),
        format_human,
    )?;
    if !result.applied {
        output::print_warning(
            format,
            "NOT_EDITING",
            "format ignored: document is not in edit mode (run `collabwrite edit <doc> --begin`)",
        );
    }
    Ok(())
}

fn execute(
    ctx: &AppContext,
    doc_id: &str,
    selection: Selection,
    command: FormatCommand,
) -> anyhow::Result<FormatResult> {
    let (_, mut session) = ctx.open_document(doc_id)?;
    let spliced = session.apply_format(selection, command);
    if spliced.is_some() {
        ctx.save_session(&session)?;
    }

    Ok(FormatResult {
        doc_id: doc_id.to_string(),
        branch: session.active_branch().to_string(),
        command,
        applied: spliced.is_some(),
        selection: spliced.map(|spliced| spliced.selection),
        content: session.active_content().to_string(),
    })
}

fn format_human(result: &FormatResult) -> String {
    match result.selection {
        Some(selection) if result.applied => format!(
            "Applied {} on branch {} (selection {}..{})",
            result.command, result.branch, selection.start, selection.end
        ),
        _ => format!("No change to {} on branch {}", result.doc_id, result.branch),
    }
}
