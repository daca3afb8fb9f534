use clap::Parser;

/// Increment version number following semver specification.
///
/// Bumps the version stored in the tracked `*_version.py` file of the
/// repository, using the categories of the changelog entries found under
/// `releases/unreleased`. MAJOR version is never increased.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about)]
pub struct Args {
    #[arg(short, long, default_value = ".")]
    pub repo: String,
    /// Do not write a new version number. Print to the standard output instead.
    #[arg(long)]
    pub dry_run: bool,
    #[arg(short, long)]
    pub verbose: bool,
}
