use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemverupError {
    #[error("not in a git repository")]
    NotARepository(#[source] git2::Error),

    #[error("repository at {0} has no working directory")]
    BareRepository(PathBuf),

    #[error("version file not found")]
    VersionFileNotFound,

    #[error("version file {} does not exist", .0.display())]
    FileNotFound(PathBuf),

    #[error("version number not found")]
    VersionNotFound(PathBuf),

    #[error("version number '{version}' in {} is not a valid semver string", .path.display())]
    InvalidVersion {
        version: String,
        path: PathBuf,
        #[source]
        source: semver::Error,
    },

    #[error("version number {0} cannot be bumped any further")]
    VersionOverflow(semver::Version),

    #[error("changelog entries directory {} does not exist.", .0.display())]
    DirectoryMissing(PathBuf),

    #[error("no changes found; version number not updated")]
    NoChanges,

    #[error("changelog entry {} could not be read", .path.display())]
    EntryIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("changelog entry {} is invalid", .path.display())]
    EntryRead {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("git operation failed")]
    Git(#[from] git2::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SemverupError>;
