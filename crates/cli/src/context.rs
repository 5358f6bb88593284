// Shared command plumbing: config, local storage, and document lookup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use collabwrite_common::types::DocumentSummary;
use collabwrite_engine::config::GlobalConfig;
use collabwrite_engine::session::DocumentSession;
use collabwrite_engine::store::dashboard::Dashboard;
use collabwrite_engine::store::local_db::LocalStorage;

use crate::exit_code::{CommandError, DOCUMENT_NOT_FOUND, STORAGE_ERROR};

/// Flags every command accepts.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Force JSON output.
    #[arg(long)]
    pub json: bool,

    /// Local storage database (defaults to the configured path).
    #[arg(long, value_name = "PATH")]
    pub storage: Option<PathBuf>,
}

pub struct AppContext {
    pub config: GlobalConfig,
    pub storage: LocalStorage,
}

impl AppContext {
    pub fn open(common: &CommonArgs) -> Result<Self> {
        let config = GlobalConfig::load();
        let path = common.storage.clone().or_else(|| config.storage_path()).ok_or_else(|| {
            CommandError::new(
                STORAGE_ERROR,
                "could not determine a local storage path; pass --storage <PATH>",
            )
        })?;
        Self::open_at(config, &path)
    }

    pub fn open_at(config: GlobalConfig, path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening local storage");
        let storage = LocalStorage::open(path).context(CommandError::new(
            STORAGE_ERROR,
            format!("failed to open local storage at `{}`", path.display()),
        ))?;
        Ok(Self { config, storage })
    }

    pub fn dashboard(&self) -> Result<Dashboard> {
        Dashboard::load(&self.storage)
            .context(CommandError::new(STORAGE_ERROR, "failed to load the document list"))
    }

    /// Look `doc_id` up on the dashboard and open its editing session.
    pub fn open_document(&self, doc_id: &str) -> Result<(DocumentSummary, DocumentSession)> {
        let dashboard = self.dashboard()?;
        let summary = dashboard.get(doc_id).cloned().ok_or_else(|| {
            CommandError::new(DOCUMENT_NOT_FOUND, format!("document `{doc_id}` not found"))
        })?;
        let session =
            DocumentSession::open(&self.storage, doc_id, self.config.editor.default_layout)
                .context(CommandError::new(
                    STORAGE_ERROR,
                    format!("failed to restore session for document `{doc_id}`"),
                ))?;
        Ok((summary, session))
    }

    pub fn save_session(&self, session: &DocumentSession) -> Result<()> {
        session.save(&self.storage).context(CommandError::new(
            STORAGE_ERROR,
            format!("failed to save session for document `{}`", session.doc_id()),
        ))
    }
}
