use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use collabwrite_common::format::{FormatCommand, Selection};
use collabwrite_common::types::PageLayout;
use collabwrite_engine::export::export_document;
use collabwrite_engine::session::DocumentSession;
use collabwrite_engine::store::dashboard::Dashboard;
use collabwrite_engine::store::local_db::LocalStorage;
use collabwrite_engine::suggest::panel::SuggestionPanel;
use collabwrite_engine::suggest::{SuggestionClient, SuggestionError};
use tempfile::TempDir;

struct FixedClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl FixedClient {
    fn new(reply: &str) -> Self {
        Self { reply: reply.to_string(), prompts: Mutex::new(Vec::new()) }
    }
}

impl SuggestionClient for FixedClient {
    fn generate(
        &self,
        prompt: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SuggestionError>> + Send>> {
        self.prompts.lock().expect("prompt log lock").push(prompt.to_string());
        let reply = self.reply.clone();
        Box::pin(async move { Ok(reply) })
    }
}

#[test]
fn dashboard_and_sessions_survive_reopening_storage() {
    let temp = TempDir::new().expect("tempdir should be created");
    let db_path = temp.path().join("local-storage.db");

    let doc_id = {
        let storage = LocalStorage::open(&db_path).expect("storage should open");
        let mut dashboard = Dashboard::load(&storage).expect("dashboard should load");
        let doc_id =
            dashboard.add_document(&storage, "Report").expect("add should succeed").id.clone();

        let mut session = DocumentSession::open(&storage, &doc_id, PageLayout::Auto)
            .expect("session should open");
        session.begin_editing();
        assert!(session.edit("hello world"));
        session.create_branch("feature");
        session
            .apply_format(Selection::new(0, 5), FormatCommand::Bold)
            .expect("format should apply in edit mode");
        session.finish_editing();
        session.save(&storage).expect("session should save");
        doc_id
    };

    let storage = LocalStorage::open(&db_path).expect("storage should reopen");
    let dashboard = Dashboard::load(&storage).expect("dashboard should reload");
    assert_eq!(dashboard.documents().len(), 5);
    assert_eq!(dashboard.documents()[0].title, "Report");
    assert_eq!(dashboard.documents()[0].collaborator_count, 1);

    let session = DocumentSession::open(&storage, &doc_id, PageLayout::A4)
        .expect("session should reopen");
    assert_eq!(session.branches(), ["main", "feature"]);
    assert_eq!(session.active_branch(), "feature");
    assert_eq!(session.content("feature"), Some("**hello** world"));
    assert_eq!(session.content("main"), Some("hello world"));
    assert_eq!(session.layout(), PageLayout::Auto, "stored layout wins over the default");
    assert!(!session.is_editing());
}

#[tokio::test]
async fn suggestions_see_the_active_branch_content() {
    let mut session = DocumentSession::new("doc-1", PageLayout::Auto);
    session.begin_editing();
    session.edit("Quarterly goals: grow revenue.");

    let client = FixedClient::new(r#"{"suggestions": ["Quantify the revenue target"]}"#);
    let mut panel = SuggestionPanel::new();
    assert!(panel.select_example(2));
    assert!(panel.submit(&client, session.active_content()).await);

    assert_eq!(panel.suggestions, ["Quantify the revenue target"]);
    assert_eq!(panel.error, None);

    let prompts = client.prompts.lock().expect("prompt log lock");
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Quarterly goals: grow revenue."));
    assert!(prompts[0].contains("Summarize the key points"));
}

#[test]
fn export_uses_session_layout() {
    let temp = TempDir::new().expect("tempdir should be created");
    let mut session = DocumentSession::new("doc-1", PageLayout::Auto);
    session.set_layout(PageLayout::A3);

    let out = temp.path().join("doc.html");
    let artifact = export_document("Report", session.active_content(), session.layout(), &out)
        .expect("export should not fail")
        .expect("template content should export");

    let page = std::fs::read_to_string(&out).expect("export should be readable");
    assert!(page.contains("size: 1123px 1587px"));
    assert!(page.contains("Project Proposal Q3"));
    assert_eq!(artifact.layout, PageLayout::A3);
}
