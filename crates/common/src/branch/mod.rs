// Branch model: named copies of a document's content.
//
// A branch is forked by copying the active branch's payload and is never merged
// back. The branch list keeps creation order; `main` always exists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the branch every document starts with.
pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BranchError {
    #[error("branch `{0}` does not exist")]
    UnknownBranch(String),
    #[error("invalid branch state: {0}")]
    InvalidState(String),
}

/// Branch list + per-branch payload + active branch pointer.
///
/// Invariants:
/// - `branches` has no duplicates and always contains [`DEFAULT_BRANCH`].
/// - every name in `branches` has an entry in `contents`.
/// - `active` is a member of `branches`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BranchSetRepr", into = "BranchSetRepr")]
pub struct BranchSet {
    branches: Vec<String>,
    contents: BTreeMap<String, String>,
    active: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BranchSetRepr {
    branches: Vec<String>,
    contents: BTreeMap<String, String>,
    active: String,
}

impl BranchSet {
    /// A fresh set holding only `main` with `initial` as its payload.
    pub fn new(initial: impl Into<String>) -> Self {
        let mut contents = BTreeMap::new();
        contents.insert(DEFAULT_BRANCH.to_string(), initial.into());
        Self {
            branches: vec![DEFAULT_BRANCH.to_string()],
            contents,
            active: DEFAULT_BRANCH.to_string(),
        }
    }

    /// Branch names in creation order.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    pub fn contains(&self, name: &str) -> bool {
        self.branches.iter().any(|branch| branch == name)
    }

    pub fn content(&self, name: &str) -> Option<&str> {
        self.contents.get(name).map(String::as_str)
    }

    pub fn active_content(&self) -> &str {
        self.contents.get(&self.active).map(String::as_str).unwrap_or_default()
    }

    /// Fork the active branch into `name` and make it active.
    ///
    /// Returns `false` without touching anything when `name` is empty or
    /// already taken.
    pub fn create_branch(&mut self, name: &str) -> bool {
        if name.is_empty() || self.contains(name) {
            return false;
        }

        let payload = self.active_content().to_string();
        self.branches.push(name.to_string());
        self.contents.insert(name.to_string(), payload);
        self.active = name.to_string();
        true
    }

    /// Point the active branch at an existing branch. Content is untouched.
    pub fn switch_branch(&mut self, name: &str) -> Result<(), BranchError> {
        if !self.contains(name) {
            return Err(BranchError::UnknownBranch(name.to_string()));
        }
        self.active = name.to_string();
        Ok(())
    }

    /// Replace the stored payload for `branch`. The payload is not inspected.
    pub fn update_content(
        &mut self,
        branch: &str,
        payload: impl Into<String>,
    ) -> Result<(), BranchError> {
        match self.contents.get_mut(branch) {
            Some(slot) if self.branches.iter().any(|name| name == branch) => {
                *slot = payload.into();
                Ok(())
            }
            _ => Err(BranchError::UnknownBranch(branch.to_string())),
        }
    }

    pub fn update_active_content(&mut self, payload: impl Into<String>) {
        let active = self.active.clone();
        if let Some(slot) = self.contents.get_mut(&active) {
            *slot = payload.into();
        }
    }
}

impl TryFrom<BranchSetRepr> for BranchSet {
    type Error = BranchError;

    fn try_from(repr: BranchSetRepr) -> Result<Self, Self::Error> {
        let mut seen = Vec::with_capacity(repr.branches.len());
        for name in &repr.branches {
            if name.is_empty() {
                return Err(BranchError::InvalidState("empty branch name".into()));
            }
            if seen.contains(&name) {
                return Err(BranchError::InvalidState(format!("duplicate branch `{name}`")));
            }
            if !repr.contents.contains_key(name) {
                return Err(BranchError::InvalidState(format!("branch `{name}` has no content")));
            }
            seen.push(name);
        }
        if !seen.iter().any(|name| name.as_str() == DEFAULT_BRANCH) {
            return Err(BranchError::InvalidState(format!("missing `{DEFAULT_BRANCH}` branch")));
        }
        if !seen.contains(&&repr.active) {
            return Err(BranchError::UnknownBranch(repr.active));
        }

        // Orphaned payloads (no list entry) are dropped.
        let mut contents = repr.contents;
        contents.retain(|name, _| repr.branches.contains(name));

        Ok(Self { branches: repr.branches, contents, active: repr.active })
    }
}

impl From<BranchSet> for BranchSetRepr {
    fn from(set: BranchSet) -> Self {
        Self { branches: set.branches, contents: set.contents, active: set.active }
    }
}
