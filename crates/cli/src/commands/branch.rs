// `collabwrite branch`: list, create, or switch a document's branches.

use clap::{Args, Subcommand};
use serde::{Deserialize, Serialize};

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, BRANCH_NOT_FOUND};

#[derive(Debug, Args)]
pub struct BranchArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    #[command(subcommand)]
    action: Option<BranchAction>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Subcommand)]
pub enum BranchAction {
    /// List branches (the default)
    List,
    /// Copy the active branch into a new branch and switch to it
    Create { name: String },
    /// Make an existing branch active
    Switch { name: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchResult {
    pub doc_id: String,
    pub branches: Vec<String>,
    pub active: String,
    /// Whether `create` added a branch; empty or duplicate names are ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
}

pub fn run(args: BranchArgs) -> anyhow::Result<()> {
    let action = args.action.unwrap_or(BranchAction::List);
    super::run_with_context(&args.common, |ctx| execute(ctx, &args.doc, action), format_human)?;
    Ok(())
}

fn execute(ctx: &AppContext, doc_id: &str, action: BranchAction) -> anyhow::Result<BranchResult> {
    let (_, mut session) = ctx.open_document(doc_id)?;

    let created = match action {
        BranchAction::List => None,
        BranchAction::Create { name } => {
            let created = session.create_branch(&name);
            if created {
                ctx.save_session(&session)?;
            }
            Some(created)
        }
        BranchAction::Switch { name } => {
            session
                .switch_branch(&name)
                .map_err(|error| CommandError::new(BRANCH_NOT_FOUND, error.to_string()))?;
            ctx.save_session(&session)?;
            None
        }
    };

    Ok(BranchResult {
        doc_id: doc_id.to_string(),
        branches: session.branches().to_vec(),
        active: session.active_branch().to_string(),
        created,
    })
}

fn format_human(result: &BranchResult) -> String {
    let mut lines = Vec::new();
    for name in &result.branches {
        let marker = if *name == result.active { "*" } else { " " };
        lines.push(format!("{marker} {name}"));
    }
    lines.join("\n")
}
