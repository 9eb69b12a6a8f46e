use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How a reported value should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    /// Version of a tool used during the build.
    Tool,
    /// Commit hash of a source repository.
    Commit,
    /// Version of a pre-built binary distributed with the build.
    Binary,
    /// Miscellaneous information.
    Info,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tool,
        Category::Commit,
        Category::Binary,
        Category::Info,
    ];

    /// Canonical upper-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Tool => "TOOL",
            Category::Commit => "COMMIT",
            Category::Binary => "BINARY",
            Category::Info => "INFO",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Category::Tool => "version of a tool used during the build",
            Category::Commit => "commit hash of a source repository",
            Category::Binary => "version of a pre-packaged binary",
            Category::Info => "miscellaneous information",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when text does not name one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown version category: {0:?}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// A single reported fact, as supplied by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    pub name: String,
    pub value: String,
    pub category: Category,
}

impl VersionEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            category,
        }
    }
}

/// A recorded fact as held by the registry and returned in snapshots.
///
/// Carries its own name so a record stays self-describing once it is
/// detached from the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub name: String,
    #[serde(rename = "version")]
    pub value: String,
    #[serde(rename = "type")]
    pub category: Category,
}

impl From<VersionEntry> for VersionInfo {
    fn from(entry: VersionEntry) -> Self {
        Self {
            name: entry.name,
            value: entry.value,
            category: entry.category,
        }
    }
}

/// Owned copy of registry contents, keyed by name in sorted order.
pub type VersionSnapshot = BTreeMap<String, VersionInfo>;
