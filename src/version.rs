use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};

use crate::entry::CategoryChange;
use crate::error::{Result, SemverupError};

pub const VERSION_FILE_PATTERN: &str = "*_version.py";

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^__version__\s*=\s*['"]([^'"]*)['"]"#).expect("version regex is valid")
    })
}

/// Semantic version increments this tool is able to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpLevel {
    Patch,
    Minor,
}

/// Increments that leave major alone and clear pre-release and build
/// metadata. Fails with `VersionOverflow` when the component is already at
/// its maximum.
pub trait Bump: Sized {
    fn bump_patch(&self) -> Result<Self>;
    fn bump_minor(&self) -> Result<Self>;

    fn bump(&self, level: BumpLevel) -> Result<Self> {
        match level {
            BumpLevel::Patch => self.bump_patch(),
            BumpLevel::Minor => self.bump_minor(),
        }
    }
}

impl Bump for Version {
    fn bump_patch(&self) -> Result<Self> {
        let patch = self
            .patch
            .checked_add(1)
            .ok_or_else(|| SemverupError::VersionOverflow(self.clone()))?;

        Ok(Version {
            major: self.major,
            minor: self.minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        })
    }

    fn bump_minor(&self) -> Result<Self> {
        let minor = self
            .minor
            .checked_add(1)
            .ok_or_else(|| SemverupError::VersionOverflow(self.clone()))?;

        Ok(Version {
            major: self.major,
            minor,
            patch: 0,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        })
    }
}

/// Minimum bump covering every category: anything other than a fix is a
/// minor change. `None` when there are no categories at all.
pub fn determine_bump_level<I>(categories: I) -> Option<BumpLevel>
where
    I: IntoIterator<Item = CategoryChange>,
{
    let mut level = None;

    for category in categories {
        if category != CategoryChange::Fixed {
            return Some(BumpLevel::Minor);
        }
        level = Some(BumpLevel::Patch);
    }

    level
}

pub fn parse_version_number(content: &str, path: &Path) -> Result<Version> {
    let captures = version_regex()
        .captures(content)
        .ok_or_else(|| SemverupError::VersionNotFound(path.to_path_buf()))?;
    let matched = &captures[1];

    Version::parse(matched).map_err(|source| SemverupError::InvalidVersion {
        version: matched.to_string(),
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_version_number(path: &Path) -> Result<Version> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SemverupError::FileNotFound(path.to_path_buf()),
        _ => SemverupError::Io(e),
    })?;

    parse_version_number(&content, path)
}

pub fn render_version_file(version: &Version, timestamp: &str) -> String {
    format!(
        "# File auto-generated by semverup on {}\n__version__ = \"{}\"\n",
        timestamp, version
    )
}

/// Replaces the whole content of `path` with a generated declaration of `version`.
pub fn write_version_number(path: &Path, version: &Version) -> Result<()> {
    let timestamp = chrono::Utc::now()
        .format("%Y-%m-%d %H:%M:%S%.6f")
        .to_string();
    fs::write(path, render_version_file(version, &timestamp))?;

    Ok(())
}
