// `collabwrite ls`: list dashboard documents.

use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_common::types::DocumentSummary;

use crate::context::{AppContext, CommonArgs};

#[derive(Debug, Args)]
pub struct LsArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LsResult {
    #[serde(default)]
    pub documents: Vec<DocumentSummary>,
}

pub fn run(args: LsArgs) -> anyhow::Result<()> {
    super::run_with_context(&args.common, execute, format_human)?;
    Ok(())
}

fn execute(ctx: &AppContext) -> anyhow::Result<LsResult> {
    let dashboard = ctx.dashboard()?;
    Ok(LsResult { documents: dashboard.documents().to_vec() })
}

fn format_human(result: &LsResult) -> String {
    if result.documents.is_empty() {
        return "No documents yet.".into();
    }

    let mut lines = Vec::new();
    lines.push(format!("{} document(s)", result.documents.len()));
    for d in &result.documents {
        lines.push(format!(
            "  [{}] {} (updated {}, {} collaborator(s))",
            d.id, d.title, d.last_updated, d.collaborator_count
        ));
        lines.push(format!("      {}", d.description));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::temp_context;
    use crate::output::{self, OutputFormat};

    fn sample_result() -> LsResult {
        LsResult {
            documents: vec![
                DocumentSummary {
                    id: "1700000000000".into(),
                    title: "Roadmap".into(),
                    last_updated: "Just now".into(),
                    collaborator_count: 1,
                    description: "A new document ready for collaboration.".into(),
                },
                DocumentSummary {
                    id: "2".into(),
                    title: "API Spec".into(),
                    last_updated: "5 hours ago".into(),
                    collaborator_count: 5,
                    description: "Specs.".into(),
                },
            ],
        }
    }

    #[test]
    fn human_format_shows_documents() {
        let output = format_human(&sample_result());
        assert!(output.contains("2 document(s)"));
        assert!(output.contains("[1700000000000] Roadmap"));
        assert!(output.contains("updated 5 hours ago, 5 collaborator(s)"));
        assert!(output.contains("A new document ready for collaboration."));
    }

    #[test]
    fn human_format_empty() {
        let output = format_human(&LsResult { documents: vec![] });
        assert!(output.contains("No documents"));
    }

    #[test]
    fn execute_lists_seeded_documents() {
        let (_dir, ctx) = temp_context();
        let result = execute(&ctx).unwrap();
        assert_eq!(result.documents.len(), 4);
        assert_eq!(result.documents[0].id, "1");
    }

    #[test]
    fn json_format_roundtrips() {
        let result = sample_result();
        let mut buf = Vec::new();
        output::write_output(&mut buf, OutputFormat::Json, &result, format_human).unwrap();
        let parsed: LsResult = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed.documents.len(), 2);
        assert_eq!(parsed.documents[0].title, "Roadmap");

        let raw: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(raw["documents"][1]["collaborators"], 5);
    }
}
