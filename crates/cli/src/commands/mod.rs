// CLI subcommand dispatch.

use clap::Subcommand;

pub mod branch;
pub mod edit;
pub mod export;
pub mod format;
pub mod history;
pub mod layout;
pub mod ls;
pub mod new;
pub mod show;
pub mod suggest;

use crate::context::{AppContext, CommonArgs};
use crate::output::{self, OutputFormat};

#[derive(Subcommand)]
pub enum Command {
    /// List documents on the dashboard
    Ls(ls::LsArgs),
    /// Create a new document
    New(new::NewArgs),
    /// Show a document's active branch
    Show(show::ShowArgs),
    /// List, create, or switch branches
    Branch(branch::BranchArgs),
    /// Enter or leave edit mode and replace branch content
    Edit(edit::EditArgs),
    /// Apply a toolbar format to a selection
    Format(format::FormatArgs),
    /// Ask for writing suggestions on the active branch
    Suggest(suggest::SuggestArgs),
    /// Show the version history panel
    History(history::HistoryArgs),
    /// Show or change the page layout
    Layout(layout::LayoutArgs),
    /// Export the active branch as a sized HTML page
    Export(export::ExportArgs),
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Ls(args) => ls::run(args),
        Command::New(args) => new::run(args),
        Command::Show(args) => show::run(args),
        Command::Branch(args) => branch::run(args),
        Command::Edit(args) => edit::run(args),
        Command::Format(args) => format::run(args),
        Command::Suggest(args) => suggest::run(args),
        Command::History(args) => history::run(args),
        Command::Layout(args) => layout::run(args),
        Command::Export(args) => export::run(args),
    }
}

/// Open the app context, run `execute`, and print its result or error.
fn run_with_context<T, E, H>(common: &CommonArgs, execute: E, human_fn: H) -> anyhow::Result<T>
where
    T: serde::Serialize,
    E: FnOnce(&AppContext) -> anyhow::Result<T>,
    H: FnOnce(&T) -> String,
{
    let format = OutputFormat::detect(common.json);
    match AppContext::open(common).and_then(|ctx| execute(&ctx)) {
        Ok(result) => {
            output::print_output(format, &result, human_fn)?;
            Ok(result)
        }
        Err(error) => {
            output::print_anyhow_error(format, &error);
            Err(error)
        }
    }
}
