// `collabwrite edit`: toggle edit mode and replace the active branch's content.
//
// Steps run in a fixed order: `--begin`, then the new content, then `--save`.
// Content is only applied while the document is in edit mode.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, INVALID_ARGUMENT};
use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// Enter edit mode first.
    #[arg(long)]
    begin: bool,

    /// Leave edit mode afterwards.
    #[arg(long)]
    save: bool,

    /// Replacement content for the active branch.
    #[arg(long, conflicts_with = "file")]
    content: Option<String>,

    /// Read replacement content from a file (`-` for stdin).
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Default)]
struct EditRequest {
    begin: bool,
    save: bool,
    payload: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditResult {
    pub doc_id: String,
    pub branch: String,
    pub editing: bool,
    /// `None` when no content was given; `Some(false)` when it was ignored
    /// because the document was not in edit mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    pub chars: usize,
}

pub fn run(args: EditArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.common.json);
    let payload = match read_payload(args.content, args.file) {
        Ok(payload) => payload,
        Err(error) => {
            output::print_anyhow_error(format, &error);
            return Err(error);
        }
    };
    let request = EditRequest { begin: args.begin, save: args.save, payload };

    let result = super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, request),
        format_human,
    )?;
    if result.applied == Some(false) {
        output::print_warning(
            format,
            "NOT_EDITING",
            "content ignored: document is not in edit mode (pass --begin)",
        );
    }
    Ok(())
}

// A payload that cannot be read is a bad argument, not a storage failure.
fn read_payload(
    content: Option<String>,
    file: Option<PathBuf>,
) -> anyhow::Result<Option<String>> {
    match (content, file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(path)) if path.as_os_str() == "-" => io::read_to_string(io::stdin())
            .map(Some)
            .context(CommandError::new(INVALID_ARGUMENT, "failed to read content from stdin")),
        (None, Some(path)) => std::fs::read_to_string(&path).map(Some).with_context(|| {
            CommandError::new(
                INVALID_ARGUMENT,
                format!("failed to read content file `{}`", path.display()),
            )
        }),
        (None, None) => Ok(None),
    }
}

fn execute(ctx: &AppContext, doc_id: &str, request: EditRequest) -> anyhow::Result<EditResult> {
    let (_, mut session) = ctx.open_document(doc_id)?;

    if request.begin {
        session.begin_editing();
    }
    let applied = request.payload.map(|payload| session.edit(payload));
    if request.save {
        session.finish_editing();
    }
    ctx.save_session(&session)?;

    Ok(EditResult {
        doc_id: doc_id.to_string(),
        branch: session.active_branch().to_string(),
        editing: session.is_editing(),
        applied,
        chars: session.active_content().chars().count(),
    })
}

fn format_human(result: &EditResult) -> String {
    let mode = if result.editing { "editing" } else { "viewing" };
    match result.applied {
        Some(true) => format!(
            "Updated {} on branch {} ({} chars, {mode})",
            result.doc_id, result.branch, result.chars
        ),
        _ => format!("{} on branch {} is now {mode}", result.doc_id, result.branch),
    }
}
