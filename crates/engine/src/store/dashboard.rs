// Dashboard document list persisted under a single local storage key.
//
// The list is read once when the dashboard loads and re-serialized in full
// after every mutation. Entries are only ever prepended.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::debug;

use collabwrite_common::types::DocumentSummary;

use super::local_db::LocalStorage;
use crate::seed::{initial_documents, JUST_NOW, NEW_DOCUMENT_DESCRIPTION};

/// Storage key holding the serialized document list.
pub const DOCUMENTS_KEY: &str = "collabwrite-documents";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    documents: Vec<DocumentSummary>,
}

impl Dashboard {
    /// Read the persisted list, seeding the four starter documents when the
    /// key is absent.
    pub fn load(storage: &LocalStorage) -> Result<Self> {
        let documents = match storage.get_item(DOCUMENTS_KEY)? {
            Some(raw) => serde_json::from_str(&raw)
                .with_context(|| format!("stored `{DOCUMENTS_KEY}` is not a document list"))?,
            None => {
                debug!("no stored document list, seeding starter documents");
                let documents = initial_documents();
                persist(storage, &documents)?;
                return Ok(Self { documents });
            }
        };
        Ok(Self { documents })
    }

    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&DocumentSummary> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Prepend a new document with default metadata and persist the list.
    pub fn add_document(
        &mut self,
        storage: &LocalStorage,
        title: &str,
    ) -> Result<&DocumentSummary> {
        self.add_document_at(storage, title, Utc::now().timestamp_millis())
    }

    /// As [`Dashboard::add_document`], with the id derived from `now_millis`.
    ///
    /// The id is the millisecond timestamp, bumped until it is unused.
    pub fn add_document_at(
        &mut self,
        storage: &LocalStorage,
        title: &str,
        now_millis: i64,
    ) -> Result<&DocumentSummary> {
        let title = title.trim();
        if title.is_empty() {
            bail!("document title must not be empty");
        }

        let mut candidate = now_millis;
        while self.get(&candidate.to_string()).is_some() {
            candidate += 1;
        }

        let mut documents = Vec::with_capacity(self.documents.len() + 1);
        documents.push(DocumentSummary {
            id: candidate.to_string(),
            title: title.to_string(),
            last_updated: JUST_NOW.to_string(),
            collaborator_count: 1,
            description: NEW_DOCUMENT_DESCRIPTION.to_string(),
        });
        documents.extend(self.documents.iter().cloned());

        // Only adopt the new list once it is stored.
        persist(storage, &documents)?;
        self.documents = documents;
        debug!(doc_id = candidate, count = self.documents.len(), "document list persisted");

        Ok(&self.documents[0])
    }
}

fn persist(storage: &LocalStorage, documents: &[DocumentSummary]) -> Result<()> {
    let raw = serde_json::to_string(documents).context("failed to serialize document list")?;
    storage.set_item(DOCUMENTS_KEY, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_storage_is_seeded_and_persisted() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let dashboard = Dashboard::load(&storage).unwrap();
        assert_eq!(dashboard.documents().len(), 4);
        assert!(storage.get_item(DOCUMENTS_KEY).unwrap().is_some());
    }

    #[test]
    fn add_document_prepends_with_defaults() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut dashboard = Dashboard::load(&storage).unwrap();

        let added = dashboard.add_document(&storage, "Report").unwrap().clone();
        assert_eq!(added.title, "Report");
        assert_eq!(added.collaborator_count, 1);
        assert_eq!(added.last_updated, "Just now");
        assert_eq!(added.description, NEW_DOCUMENT_DESCRIPTION);
        assert_eq!(dashboard.documents()[0], added);
        assert_eq!(dashboard.documents().len(), 5);
    }

    #[test]
    fn ids_stay_unique_within_the_same_millisecond() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut dashboard = Dashboard::load(&storage).unwrap();

        let now = 1_700_000_000_000;
        let first = dashboard.add_document_at(&storage, "A", now).unwrap().id.clone();
        let second = dashboard.add_document_at(&storage, "B", now).unwrap().id.clone();
        assert_eq!(first, "1700000000000");
        assert_eq!(second, "1700000000001");
    }

    #[test]
    fn every_mutation_is_visible_to_a_fresh_load() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut dashboard = Dashboard::load(&storage).unwrap();
        dashboard.add_document(&storage, "Persisted").unwrap();

        let reloaded = Dashboard::load(&storage).unwrap();
        assert_eq!(reloaded, dashboard);
        assert_eq!(reloaded.documents()[0].title, "Persisted");
    }

    #[test]
    fn blank_title_is_rejected() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut dashboard = Dashboard::load(&storage).unwrap();
        assert!(dashboard.add_document(&storage, "   ").is_err());
        assert_eq!(dashboard.documents().len(), 4);
    }

    #[test]
    fn failed_persist_leaves_list_unchanged() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut dashboard = Dashboard::load(&storage).unwrap();
        storage.connection().execute_batch("DROP TABLE local_storage;").unwrap();

        assert!(dashboard.add_document(&storage, "Ghost").is_err());
        assert_eq!(dashboard.documents().len(), 4);
        assert!(dashboard.documents().iter().all(|doc| doc.title != "Ghost"));
    }

    #[test]
    fn corrupt_stored_list_is_an_error() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item(DOCUMENTS_KEY, "not json").unwrap();
        assert!(Dashboard::load(&storage).is_err());
    }

    #[test]
    fn stored_list_uses_original_field_names() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage
            .set_item(
                DOCUMENTS_KEY,
                concat!(
                    r#"[{"id":"9","title":"Kept","lastUpdated":"1 hour ago","#,
                    r#""collaborators":2,"description":"d"}]"#,
                ),
            )
            .unwrap();
        let dashboard = Dashboard::load(&storage).unwrap();
        assert_eq!(dashboard.documents().len(), 1);
        assert_eq!(dashboard.get("9").unwrap().collaborator_count, 2);
    }
}
