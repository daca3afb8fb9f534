pub mod args;
pub mod entry;
pub mod error;
pub mod repo;
pub mod version;

use std::path::Path;

use semver::Version;

use crate::entry::{changelog_entries_dirpath, read_changelog_entries};
use crate::error::{Result, SemverupError};
use crate::repo::GitHandler;
use crate::version::{
    determine_bump_level, read_version_number, write_version_number, Bump,
    VERSION_FILE_PATTERN,
};

/// Computes the next version of the package in the repository containing
/// `repo_path` and, unless `dry_run` is set, writes it to the version file.
pub fn run(repo_path: impl AsRef<Path>, dry_run: bool) -> Result<Version> {
    let git = GitHandler::discover(repo_path)?;
    tracing::debug!("repository root: {}", git.root().display());

    let filepath = git
        .find_file(VERSION_FILE_PATTERN)?
        .ok_or(SemverupError::VersionFileNotFound)?;
    let current_version = read_version_number(&filepath)?;
    tracing::debug!("current version {} in {}", current_version, filepath.display());

    let dirpath = changelog_entries_dirpath(git.root());
    if !dirpath.exists() {
        return Err(SemverupError::DirectoryMissing(dirpath));
    }
    let entries = read_changelog_entries(&dirpath)?;
    tracing::debug!("{} unreleased changelog entries", entries.len());

    let level = determine_bump_level(entries.values().map(|e| e.category))
        .ok_or(SemverupError::NoChanges)?;
    let new_version = current_version.bump(level)?;
    tracing::debug!("{:?} bump: {} -> {}", level, current_version, new_version);

    if !dry_run {
        write_version_number(&filepath, &new_version)?;
        tracing::info!("wrote {} to {}", new_version, filepath.display());
    }

    Ok(new_version)
}
