// A document view: the single owner of one document's editable state.
//
// Handlers receive the session by `&mut` reference; nothing else holds the
// branch set. Edits and toolbar actions only apply while in edit mode.

use anyhow::Result;
use tracing::{debug, info};

use collabwrite_common::branch::{BranchError, BranchSet};
use collabwrite_common::format::{apply_markdown, FormatCommand, Selection, Spliced};
use collabwrite_common::types::PageLayout;

use crate::seed::DOCUMENT_TEMPLATE;
use crate::store::local_db::LocalStorage;
use crate::store::sessions::{SessionState, SessionStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSession {
    doc_id: String,
    state: SessionState,
}

impl DocumentSession {
    /// A fresh view whose `main` branch holds the document template.
    pub fn new(doc_id: impl Into<String>, layout: PageLayout) -> Self {
        Self {
            doc_id: doc_id.into(),
            state: SessionState {
                branch_set: BranchSet::new(DOCUMENT_TEMPLATE),
                editing: false,
                layout,
            },
        }
    }

    /// Restore the stored view for `doc_id`, or start a fresh one.
    pub fn open(storage: &LocalStorage, doc_id: &str, default_layout: PageLayout) -> Result<Self> {
        match SessionStore::load(storage, doc_id)? {
            Some(state) => {
                debug!(%doc_id, branch = %state.branch_set.active(), "session restored");
                Ok(Self { doc_id: doc_id.to_string(), state })
            }
            None => {
                debug!(%doc_id, "no stored session, starting from template");
                Ok(Self::new(doc_id, default_layout))
            }
        }
    }

    pub fn save(&self, storage: &LocalStorage) -> Result<()> {
        SessionStore::save(storage, &self.doc_id, &self.state)
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn branches(&self) -> &[String] {
        self.state.branch_set.branches()
    }

    pub fn active_branch(&self) -> &str {
        self.state.branch_set.active()
    }

    pub fn active_content(&self) -> &str {
        self.state.branch_set.active_content()
    }

    pub fn content(&self, branch: &str) -> Option<&str> {
        self.state.branch_set.content(branch)
    }

    pub fn is_editing(&self) -> bool {
        self.state.editing
    }

    pub fn layout(&self) -> PageLayout {
        self.state.layout
    }

    pub fn begin_editing(&mut self) {
        self.state.editing = true;
    }

    pub fn finish_editing(&mut self) {
        self.state.editing = false;
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        self.state.layout = layout;
    }

    /// Fork the active branch. Empty and duplicate names are ignored.
    pub fn create_branch(&mut self, name: &str) -> bool {
        let from = self.active_branch().to_string();
        let created = self.state.branch_set.create_branch(name);
        if created {
            info!(doc_id = %self.doc_id, %from, branch = %name, "branch created");
        } else {
            debug!(doc_id = %self.doc_id, branch = %name, "branch name empty or taken, ignored");
        }
        created
    }

    pub fn switch_branch(&mut self, name: &str) -> Result<(), BranchError> {
        self.state.branch_set.switch_branch(name)?;
        info!(doc_id = %self.doc_id, branch = %name, "switched branch");
        Ok(())
    }

    /// Replace the active branch's payload. Ignored outside edit mode.
    pub fn edit(&mut self, payload: impl Into<String>) -> bool {
        if !self.state.editing {
            return false;
        }
        self.state.branch_set.update_active_content(payload);
        true
    }

    /// Apply a toolbar command to the active branch. Ignored outside edit mode.
    pub fn apply_format(
        &mut self,
        selection: Selection,
        command: FormatCommand,
    ) -> Option<Spliced> {
        if !self.state.editing {
            debug!(doc_id = %self.doc_id, %command, "format ignored outside edit mode");
            return None;
        }
        let spliced = apply_markdown(self.active_content(), selection, command);
        self.state.branch_set.update_active_content(spliced.content.clone());
        Some(spliced)
    }
}
