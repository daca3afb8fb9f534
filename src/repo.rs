use std::path::{Path, PathBuf};

use git2::{Pathspec, PathspecFlags, Repository};

use crate::error::{Result, SemverupError};

/// Read-only access to the files tracked by a git repository.
pub struct GitHandler {
    repo: Repository,
    root: PathBuf,
}

impl GitHandler {
    /// Discovers the repository containing `path`, walking up parent directories.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = Repository::discover(path.as_ref()).map_err(SemverupError::NotARepository)?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| SemverupError::BareRepository(repo.path().to_path_buf()))?;

        Ok(GitHandler { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Tracked files matching `pattern`, the same set `git ls-files <pattern>`
    /// reports, as absolute paths in lexicographic order.
    pub fn tracked_files(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let index = self.repo.index()?;
        let pathspec = Pathspec::new([pattern])?;
        let matches = pathspec.match_index(&index, PathspecFlags::DEFAULT)?;

        let mut files = matches
            .entries()
            .filter_map(index_path)
            .map(|entry| self.root.join(entry))
            .collect::<Vec<_>>();
        files.sort();

        Ok(files)
    }

    /// First tracked file matching `pattern`, or `None` when nothing matches.
    pub fn find_file(&self, pattern: &str) -> Result<Option<PathBuf>> {
        let mut files = self.tracked_files(pattern)?.into_iter();
        let first = files.next();

        if let Some(first) = &first {
            let others = files.map(|f| f.display().to_string()).collect::<Vec<_>>();
            if !others.is_empty() {
                tracing::warn!(
                    "several files match {}; using {} and ignoring {}",
                    pattern,
                    first.display(),
                    others.join(", ")
                );
            }
        }

        Ok(first)
    }
}

// Index paths are raw bytes; unix paths can hold any of them.
#[cfg(unix)]
fn index_path(bytes: &[u8]) -> Option<PathBuf> {
    use std::os::unix::ffi::OsStrExt;

    Some(PathBuf::from(std::ffi::OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn index_path(bytes: &[u8]) -> Option<PathBuf> {
    match std::str::from_utf8(bytes) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            tracing::warn!(
                "skipping tracked file with a non UTF-8 path: {}",
                String::from_utf8_lossy(bytes)
            );
            None
        }
    }
}
