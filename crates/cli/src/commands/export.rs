// `collabwrite export`: write the active branch as a page sized to its layout.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use collabwrite_common::types::PageLayout;
use collabwrite_engine::export::{export_document, ExportArtifact, DEFAULT_EXPORT_FILE};

use crate::context::{AppContext, CommonArgs};

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// Output path.
    #[arg(long, short, default_value = DEFAULT_EXPORT_FILE)]
    out: PathBuf,

    /// Override the document's layout for this export only.
    #[arg(long)]
    layout: Option<PageLayout>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub doc_id: String,
    pub branch: String,
    /// `None` when the branch had no content to export.
    pub artifact: Option<ExportArtifact>,
}

pub fn run(args: ExportArgs) -> anyhow::Result<()> {
    super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, &args.out, args.layout),
        format_human,
    )?;
    Ok(())
}

fn execute(
    ctx: &AppContext,
    doc_id: &str,
    out: &std::path::Path,
    layout: Option<PageLayout>,
) -> anyhow::Result<ExportResult> {
    let (summary, session) = ctx.open_document(doc_id)?;
    let layout = layout.unwrap_or_else(|| session.layout());
    let artifact = export_document(&summary.title, session.active_content(), layout, out)?;

    Ok(ExportResult {
        doc_id: doc_id.to_string(),
        branch: session.active_branch().to_string(),
        artifact,
    })
}

fn format_human(result: &ExportResult) -> String {
    match &result.artifact {
        Some(artifact) => format!(
            "Exported {} ({}) to {} [{}, {} bytes]",
            result.doc_id,
            result.branch,
            artifact.path.display(),
            artifact.layout,
            artifact.bytes
        ),
        None => {
            format!("Nothing to export: branch {} of {} is empty", result.branch, result.doc_id)
        }
    }
}
