// `collabwrite show`: print a document's branch content.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::types::PageLayout;

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, BRANCH_NOT_FOUND};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// Show this branch instead of the active one. Does not switch.
    #[arg(long)]
    branch: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowResult {
    pub doc_id: String,
    pub title: String,
    pub branch: String,
    pub active_branch: String,
    pub editing: bool,
    pub layout: PageLayout,
    pub content: String,
}

pub fn run(args: ShowArgs) -> anyhow::Result<()> {
    super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, args.branch.as_deref()),
        format_human,
    )?;
    Ok(())
}

fn execute(ctx: &AppContext, doc_id: &str, branch: Option<&str>) -> anyhow::Result<ShowResult> {
    let (summary, session) = ctx.open_document(doc_id)?;
    let branch = branch.unwrap_or_else(|| session.active_branch()).to_string();
    let content = session.content(&branch).ok_or_else(|| {
        CommandError::new(BRANCH_NOT_FOUND, format!("unknown branch `{branch}`"))
    })?;

    Ok(ShowResult {
        doc_id: summary.id,
        title: summary.title,
        active_branch: session.active_branch().to_string(),
        editing: session.is_editing(),
        layout: session.layout(),
        content: content.to_string(),
        branch,
    })
}

fn format_human(result: &ShowResult) -> String {
    let mode = if result.editing { "editing" } else { "viewing" };
    let mut header = format!(
        "{} [{}] on branch {} ({mode}, layout {})",
        result.title, result.doc_id, result.branch, result.layout
    );
    if result.branch != result.active_branch {
        header.push_str(&format!(", active branch is {}", result.active_branch));
    }
    format!("{header}\n\n{}", result.content)
}
