// Fixed seed data: the starter dashboard and the document template.

use collabwrite_common::types::DocumentSummary;

/// `lastUpdated` display value for freshly created documents.
pub const JUST_NOW: &str = "Just now";

/// Description given to documents created from the dashboard.
pub const NEW_DOCUMENT_DESCRIPTION: &str = "A new document ready for collaboration.";

/// Dashboard entries used when nothing has been persisted yet.
pub fn initial_documents() -> Vec<DocumentSummary> {
    [
        (
            "1",
            "Project Proposal Q3",
            "2 days ago",
            3,
            "Drafting the project proposal for the upcoming quarter, focusing on market expansion.",
        ),
        (
            "2",
            "Technical Specification - API V2",
            "5 hours ago",
            5,
            "Detailed technical specs for the new version of our primary API.",
        ),
        (
            "3",
            "Marketing Campaign Strategy",
            "1 week ago",
            2,
            "Brainstorming and outlining the marketing strategy for the new product launch.",
        ),
        (
            "4",
            "Onboarding Manual for New Hires",
            "3 days ago",
            4,
            "A comprehensive guide for new employees to get up to speed quickly.",
        ),
    ]
    .into_iter()
    .map(|(id, title, last_updated, collaborator_count, description)| DocumentSummary {
        id: id.into(),
        title: title.into(),
        last_updated: last_updated.into(),
        collaborator_count,
        description: description.into(),
    })
    .collect()
}

/// Content every new document view starts from on its `main` branch.
pub const DOCUMENT_TEMPLATE: &str = "\
# Project Proposal Q3 - CollabWrite Draft

## 1. Introduction

Welcome to **CollabWrite**, the real-time collaborative document platform. This document serves as a demonstration of its core features, including simultaneous editing, version control, and AI-powered assistance.

## 2. Real-Time Collaboration

Multiple users can edit this document at the same time. Cursors of other users will be visible, and changes will appear instantly. Our system handles conflicts automatically, ensuring a smooth editing experience.

## 3. Version Control

- **Branching:** Use the 'Branch' button to create a new version of this document without affecting the main draft.
- **History:** Click 'Version History' to see all past changes and restore previous versions if needed.

## 4. Smart Suggestions

Click the 'Smart Suggestions' button and ask the AI for help. For example, try asking it to \"suggest a concluding paragraph for this proposal.\"
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_distinct_seed_documents() {
        let docs = initial_documents();
        assert_eq!(docs.len(), 4);
        let mut ids: Vec<_> = docs.iter().map(|doc| doc.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids, ["1", "2", "3", "4"]);
        assert_eq!(docs[1].collaborator_count, 5);
    }

    #[test]
    fn template_starts_with_title_heading() {
        assert!(DOCUMENT_TEMPLATE.starts_with("# Project Proposal Q3"));
        assert!(DOCUMENT_TEMPLATE.contains("## 4. Smart Suggestions"));
    }
}
