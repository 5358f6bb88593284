// `collabwrite new`: add a document to the dashboard.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::types::DocumentSummary;

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, INVALID_ARGUMENT};

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Document title.
    pub title: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResult {
    pub document: DocumentSummary,
}

pub fn run(args: NewArgs) -> anyhow::Result<()> {
    let title = args.title;
    super::run_with_context(&args.common, |ctx| execute(ctx, &title), format_human)?;
    Ok(())
}

fn execute(ctx: &AppContext, title: &str) -> anyhow::Result<NewResult> {
    if title.trim().is_empty() {
        return Err(CommandError::new(INVALID_ARGUMENT, "document title must not be empty").into());
    }
    let mut dashboard = ctx.dashboard()?;
    let document = dashboard.add_document(&ctx.storage, title)?.clone();
    Ok(NewResult { document })
}

fn format_human(result: &NewResult) -> String {
    format!("Created document [{}] {}", result.document.id, result.document.title)
}
