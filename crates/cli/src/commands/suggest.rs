// `collabwrite suggest`: ask the suggestion service about the active branch.

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};

use collabwrite_engine::suggest::http::HttpSuggestionClient;
use collabwrite_engine::suggest::panel::{SuggestionPanel, EXAMPLE_QUERIES};
use collabwrite_engine::suggest::SuggestionClient;

use crate::context::{AppContext, CommonArgs};
use crate::exit_code::{CommandError, INVALID_ARGUMENT, SUGGESTION_FAILED};

#[derive(Debug, Args)]
pub struct SuggestArgs {
    /// Document id (see `collabwrite ls`).
    pub doc: String,

    /// What to ask about the document.
    #[arg(long, conflicts_with = "example")]
    query: Option<String>,

    /// Use one of the example queries (1-4).
    #[arg(long, value_name = "N")]
    example: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestResult {
    pub doc_id: String,
    pub branch: String,
    pub query: String,
    pub suggestions: Vec<String>,
}

pub fn run(args: SuggestArgs) -> anyhow::Result<()> {
    super::run_with_context(
        &args.common,
        |ctx| execute(ctx, &args.doc, args.query.as_deref(), args.example),
        format_human,
    )?;
    Ok(())
}

fn execute(
    ctx: &AppContext,
    doc_id: &str,
    query: Option<&str>,
    example: Option<usize>,
) -> anyhow::Result<SuggestResult> {
    let panel = prepare_panel(query, example)?;
    let (_, session) = ctx.open_document(doc_id)?;
    let client = HttpSuggestionClient::from_config(&ctx.config.ai)
        .context("invalid [ai] section in ~/.collabwrite/config.toml")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let panel = runtime.block_on(ask(&client, panel, session.active_content()));

    into_result(panel, doc_id, session.active_branch())
}

fn prepare_panel(query: Option<&str>, example: Option<usize>) -> anyhow::Result<SuggestionPanel> {
    let mut panel = SuggestionPanel::new();
    if let Some(query) = query {
        panel.query = query.to_string();
    }
    if let Some(n) = example {
        if n == 0 || !panel.select_example(n - 1) {
            return Err(CommandError::new(
                INVALID_ARGUMENT,
                format!("example must be between 1 and {}", EXAMPLE_QUERIES.len()),
            )
            .into());
        }
    }
    if !panel.can_submit() {
        let examples = EXAMPLE_QUERIES
            .iter()
            .enumerate()
            .map(|(i, q)| format!("  {}. {q}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CommandError::new(
            INVALID_ARGUMENT,
            format!("a query is required; pass --query <TEXT> or --example <N>:\n{examples}"),
        )
        .into());
    }
    Ok(panel)
}

async fn ask(
    client: &dyn SuggestionClient,
    mut panel: SuggestionPanel,
    document_content: &str,
) -> SuggestionPanel {
    panel.submit(client, document_content).await;
    panel
}

fn into_result(
    panel: SuggestionPanel,
    doc_id: &str,
    branch: &str,
) -> anyhow::Result<SuggestResult> {
    if let Some(error) = panel.error {
        return Err(CommandError::new(SUGGESTION_FAILED, error).into());
    }
    Ok(SuggestResult {
        doc_id: doc_id.to_string(),
        branch: branch.to_string(),
        query: panel.query,
        suggestions: panel.suggestions,
    })
}

fn format_human(result: &SuggestResult) -> String {
    if result.suggestions.is_empty() {
        return format!("No suggestions for \"{}\".", result.query);
    }
    let mut lines = vec![format!("Suggestions for \"{}\":", result.query)];
    lines.extend(result.suggestions.iter().map(|s| format!("  - {s}")));
    lines.join("\n")
}
