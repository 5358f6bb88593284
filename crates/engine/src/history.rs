// Version history panel entries.
//
// Static placeholder data: entries are not derived from branch content and
// there is no restore.

use collabwrite_common::types::VersionEntry;

pub fn version_history() -> Vec<VersionEntry> {
    [
        ("v5", "Finalized Q3 goals and projections", "Alice", "5 hours ago", Some("Latest")),
        ("v4", "Added market analysis section", "Bob", "1 day ago", None),
        ("v3", "Revised project timeline", "Alice", "2 days ago", None),
        ("v2", "Initial draft of proposal", "Charlie", "2 days ago", None),
        ("v1", "Created document", "Alice", "3 days ago", None),
    ]
    .into_iter()
    .map(|(id, message, author, timestamp, tag)| VersionEntry {
        id: id.into(),
        message: message.into(),
        author: author.into(),
        timestamp: timestamp.into(),
        tag: tag.map(Into::into),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_with_latest_tag() {
        let history = version_history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].id, "v5");
        assert_eq!(history[0].tag.as_deref(), Some("Latest"));
        assert!(history[1..].iter().all(|entry| entry.tag.is_none()));
        assert_eq!(history[4].message, "Created document");
    }
}
