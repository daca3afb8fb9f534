use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SemverupError};

/// Location of the pending entries, relative to the repository root.
pub const UNRELEASED_DIR: [&str; 2] = ["releases", "unreleased"];

/// Kind of change a changelog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryChange {
    Added,
    Fixed,
    Changed,
    Deprecated,
    Removed,
    Security,
    Performance,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Issue {
    Number(u64),
    Text(String),
}

/// A pending change, as written in one `releases/unreleased` fragment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangelogEntry {
    pub title: String,
    pub category: CategoryChange,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub issue: Option<Issue>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ChangelogEntry {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SemverupError::EntryIo {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| SemverupError::EntryRead {
            path: path.to_path_buf(),
            source,
        })
    }
}

pub fn changelog_entries_dirpath(root: &Path) -> PathBuf {
    UNRELEASED_DIR.iter().fold(root.to_path_buf(), |p, c| p.join(c))
}

/// Reads every fragment in `dirpath`, keyed by file name.
///
/// Subdirectories and hidden files (such as `.gitkeep`) are not fragments.
pub fn read_changelog_entries(dirpath: &Path) -> Result<BTreeMap<String, ChangelogEntry>> {
    let mut entries = BTreeMap::new();

    for dir_entry in fs::read_dir(dirpath)? {
        let dir_entry = dir_entry?;
        let name = dir_entry.file_name().to_string_lossy().into_owned();

        if name.starts_with('.') || !dir_entry.file_type()?.is_file() {
            tracing::debug!("skipping {}", dir_entry.path().display());
            continue;
        }

        let entry = ChangelogEntry::from_file(&dir_entry.path())?;
        entries.insert(name, entry);
    }

    Ok(entries)
}
