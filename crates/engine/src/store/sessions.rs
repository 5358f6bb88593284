// Per-document session state persisted in local storage.
//
// One key per document (`collabwrite-session:<id>`) holding the branch set,
// the edit-mode flag, and the page layout as JSON.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use collabwrite_common::branch::BranchSet;
use collabwrite_common::types::PageLayout;

use super::local_db::LocalStorage;

pub const SESSION_KEY_PREFIX: &str = "collabwrite-session:";

pub fn session_key(doc_id: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{doc_id}")
}

/// Serialized form of a document view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionState {
    pub branch_set: BranchSet,
    #[serde(default)]
    pub editing: bool,
    #[serde(default)]
    pub layout: PageLayout,
}

/// Stateless load/save of session rows.
pub struct SessionStore;

impl SessionStore {
    pub fn load(storage: &LocalStorage, doc_id: &str) -> Result<Option<SessionState>> {
        let Some(raw) = storage.get_item(&session_key(doc_id))? else {
            return Ok(None);
        };
        let state = serde_json::from_str(&raw)
            .with_context(|| format!("stored session for document `{doc_id}` is invalid"))?;
        Ok(Some(state))
    }

    pub fn save(storage: &LocalStorage, doc_id: &str, state: &SessionState) -> Result<()> {
        let raw = serde_json::to_string(state)
            .with_context(|| format!("failed to serialize session for document `{doc_id}`"))?;
        storage.set_item(&session_key(doc_id), &raw)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> SessionState {
        let mut branch_set = BranchSet::new("# Title");
        branch_set.create_branch("draft");
        SessionState { branch_set, editing: true, layout: PageLayout::A4 }
    }

    #[test]
    fn save_then_load_returns_same_state() {
        let storage = LocalStorage::open_in_memory().unwrap();
        SessionStore::save(&storage, "42", &sample_state()).unwrap();
        let loaded = SessionStore::load(&storage, "42").unwrap().expect("state should exist");
        assert_eq!(loaded, sample_state());
    }

    #[test]
    fn load_missing_returns_none() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert!(SessionStore::load(&storage, "nope").unwrap().is_none());
    }

    #[test]
    fn invalid_branch_state_fails_to_load() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage
            .set_item(
                &session_key("7"),
                r#"{"branch_set":{"branches":["main"],"contents":{},"active":"main"}}"#,
            )
            .unwrap();
        assert!(SessionStore::load(&storage, "7").is_err());
    }
}
