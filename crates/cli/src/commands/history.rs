// `collabwrite history`: the version history panel.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::types::VersionEntry;
use collabwrite_engine::history::version_history;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Force JSON output.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResult {
    pub versions: Vec<VersionEntry>,
}

pub fn run(args: HistoryArgs) -> anyhow::Result<()> {
    let format = OutputFormat::detect(args.json);
    let result = HistoryResult { versions: version_history() };
    output::print_output(format, &result, format_human)?;
    Ok(())
}

fn format_human(result: &HistoryResult) -> String {
    let mut lines = vec!["Version History".to_string()];
    for v in &result.versions {
        let tag = v.tag.as_deref().map(|tag| format!(" [{tag}]")).unwrap_or_default();
        lines.push(format!("  {}{tag}  {}", v.id, v.message));
        lines.push(format!("      by {}, {}", v.author, v.timestamp));
    }
    lines.join("\n")
}
