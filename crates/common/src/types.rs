// Core domain types shared across all CollabWrite crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A dashboard card: the summary of one document.
///
/// Field names on the wire match the persisted dashboard list
/// (`lastUpdated`, `collaborators`), so existing stored lists keep loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
    /// Display string, e.g. `"2 days ago"` or `"Just now"`.
    pub last_updated: String,
    #[serde(rename = "collaborators")]
    pub collaborator_count: u32,
    pub description: String,
}

/// Page size used when exporting a document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum PageLayout {
    A1,
    A2,
    A3,
    A4,
    A5,
    #[default]
    #[serde(rename = "auto")]
    Auto,
}

/// Fixed page size in CSS pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageDimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl PageLayout {
    pub const ALL: [PageLayout; 6] = [
        PageLayout::Auto,
        PageLayout::A1,
        PageLayout::A2,
        PageLayout::A3,
        PageLayout::A4,
        PageLayout::A5,
    ];

    /// Pixel size of the preset. `Auto` has none: the content's natural size is used.
    pub fn dimensions(self) -> Option<PageDimensions> {
        let (width, height) = match self {
            Self::A1 => (2245, 3175),
            Self::A2 => (1587, 2245),
            Self::A3 => (1123, 1587),
            Self::A4 => (794, 1123),
            Self::A5 => (559, 794),
            Self::Auto => return None,
        };
        Some(PageDimensions { width, height })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A1 => "A1",
            Self::A2 => "A2",
            Self::A3 => "A3",
            Self::A4 => "A4",
            Self::A5 => "A5",
            Self::Auto => "auto",
        }
    }
}

impl PageDimensions {
    pub fn orientation(self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }
}

impl fmt::Display for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown page layout `{0}` (expected auto, A1, A2, A3, A4 or A5)")]
pub struct UnknownPageLayout(pub String);

impl FromStr for PageLayout {
    type Err = UnknownPageLayout;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a1" => Ok(Self::A1),
            "a2" => Ok(Self::A2),
            "a3" => Ok(Self::A3),
            "a4" => Ok(Self::A4),
            "a5" => Ok(Self::A5),
            "auto" => Ok(Self::Auto),
            _ => Err(UnknownPageLayout(value.to_string())),
        }
    }
}

/// One row of the version history panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VersionEntry {
    pub id: String,
    pub message: String,
    pub author: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}
