use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked repository location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub repository_id: i64,
    pub uri: String,
    /// Most recently ingested change. Not a foreign key, `changes` already
    /// references `repositories`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_change_id: Option<String>,
}

/// One commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub change_id: String,
    pub commit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub commit_message: String,
    pub commit_time: DateTime<Utc>,
    pub repository_id: i64,
}

/// One file or directory action within one change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Path {
    pub repository_id: i64,
    pub change_id: String,
    pub path: String,
    pub kind: PathKind,
    pub action: PathAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_change_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
}

impl Path {
    /// Copies and moves carry a base, every other action carries none.
    #[must_use]
    pub fn has_consistent_base(&self) -> bool {
        let has_base = self.base_change_id.is_some() && self.base_path.is_some();
        let has_no_base = self.base_change_id.is_none() && self.base_path.is_none();
        match self.action {
            PathAction::Copied | PathAction::Moved => has_base,
            _ => has_no_base,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKind {
    Directory,
    File,
}

impl PathKind {
    /// Single letter stored in the `paths.kind` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Directory => "d",
            Self::File => "f",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "d" => Some(Self::Directory),
            "f" => Some(Self::File),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Directory => "directory",
            Self::File => "file",
        }
    }
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathAction {
    Added,
    Copied,
    Deleted,
    Edited,
    Moved,
}

impl PathAction {
    /// Single letter stored in the `paths.action` column.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Added => "a",
            Self::Copied => "c",
            Self::Deleted => "d",
            Self::Edited => "e",
            Self::Moved => "m",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "a" => Some(Self::Added),
            "c" => Some(Self::Copied),
            "d" => Some(Self::Deleted),
            "e" => Some(Self::Edited),
            "m" => Some(Self::Moved),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Copied => "copied",
            Self::Deleted => "deleted",
            Self::Edited => "edited",
            Self::Moved => "moved",
        }
    }
}

impl fmt::Display for PathAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(action: PathAction, base: Option<(&str, &str)>) -> Path {
        Path {
            repository_id: 1,
            change_id: "01-2".to_string(),
            path: "/trunk/b.txt".to_string(),
            kind: PathKind::File,
            action,
            base_change_id: base.map(|(c, _)| c.to_string()),
            base_path: base.map(|(_, p)| p.to_string()),
        }
    }

    #[test]
    fn test_codes_round_trip() {
        for action in [
            PathAction::Added,
            PathAction::Copied,
            PathAction::Deleted,
            PathAction::Edited,
            PathAction::Moved,
        ] {
            assert_eq!(PathAction::from_code(action.code()), Some(action));
        }
        assert_eq!(PathKind::from_code("d"), Some(PathKind::Directory));
        assert_eq!(PathKind::from_code("x"), None);
    }

    #[test]
    fn test_consistent_base() {
        assert!(path(PathAction::Added, None).has_consistent_base());
        assert!(path(PathAction::Copied, Some(("01-1", "/trunk/a.txt"))).has_consistent_base());
        assert!(!path(PathAction::Moved, None).has_consistent_base());
        assert!(!path(PathAction::Edited, Some(("01-1", "/trunk/a.txt"))).has_consistent_base());
    }

    #[test]
    fn test_display_uses_long_names() {
        assert_eq!(PathAction::Moved.to_string(), "moved");
        assert_eq!(PathKind::Directory.to_string(), "directory");
    }
}
