use std::fs;
use std::path::Path;

use assert_cmd::Command;
use git2::Repository;
use predicates::prelude::*;
use tempfile::TempDir;

const VERSION_FILE: &str = "mypkg/_version.py";

// Repository with a tracked version file and the given unreleased fragments.
// `None` leaves the releases/unreleased directory out entirely.
fn setup_repo(version: &str, fragments: Option<&[(&str, &str)]>) -> TempDir {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

    let version_path = temp_dir.path().join(VERSION_FILE);
    fs::create_dir_all(version_path.parent().unwrap()).unwrap();
    fs::write(&version_path, format!("__version__ = '{}'\n", version)).unwrap();

    let mut index = repo.index().expect("Could not get index");
    index.add_path(Path::new(VERSION_FILE)).unwrap();
    index.write().expect("Could not write index");

    if let Some(fragments) = fragments {
        let dir = temp_dir.path().join("releases").join("unreleased");
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in fragments {
            fs::write(dir.join(name), content).unwrap();
        }
    }

    temp_dir
}

fn semverup(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("semverup").unwrap();
    cmd.current_dir(dir);
    cmd
}

const FIXED: &str = "title: Fix crash\ncategory: fixed\nauthor: someone\n";
const ADDED: &str = "title: New option\ncategory: added\nissue: 12\n";

#[test]
fn test_patch_bump_writes_file() {
    let temp_dir = setup_repo("1.2.3", Some(&[("fix.yml", FIXED)]));

    semverup(temp_dir.path())
        .assert()
        .success()
        .stdout("1.2.4\n");

    let content = fs::read_to_string(temp_dir.path().join(VERSION_FILE)).unwrap();
    assert!(content.starts_with("# File auto-generated by semverup on "));
    assert!(content.ends_with("__version__ = \"1.2.4\"\n"));
}

#[test]
fn test_minor_bump() {
    let temp_dir = setup_repo("1.2.3", Some(&[("a.yml", FIXED), ("b.yml", ADDED)]));

    semverup(temp_dir.path())
        .assert()
        .success()
        .stdout("1.3.0\n");
}

#[test]
fn test_dry_run_leaves_file_untouched() {
    let temp_dir = setup_repo("2.0.0", Some(&[("b.yml", ADDED)]));
    let path = temp_dir.path().join(VERSION_FILE);
    let before = fs::read(&path).unwrap();

    semverup(temp_dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout("2.1.0\n");

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_repo_argument() {
    let temp_dir = setup_repo("0.1.0", Some(&[("fix.yml", FIXED)]));
    let outside = TempDir::new().unwrap();

    semverup(outside.path())
        .args(["--dry-run", "--repo"])
        .arg(temp_dir.path().join("mypkg"))
        .assert()
        .success()
        .stdout("0.1.1\n");
}

#[test]
fn test_second_run_bumps_again() {
    let temp_dir = setup_repo("1.2.3", Some(&[("fix.yml", FIXED)]));

    semverup(temp_dir.path()).assert().success().stdout("1.2.4\n");
    semverup(temp_dir.path()).assert().success().stdout("1.2.5\n");
}

#[test]
fn test_no_changes() {
    let temp_dir = setup_repo("1.2.3", Some(&[]));

    semverup(temp_dir.path())
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains(
            "no changes found; version number not updated",
        ));
}

#[test]
fn test_missing_changelog_directory() {
    let temp_dir = setup_repo("1.2.3", None);

    semverup(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("changelog entries directory"))
        .stderr(predicate::str::contains("does not exist."));
}

#[test]
fn test_invalid_version() {
    let temp_dir = setup_repo("1.2", Some(&[("fix.yml", FIXED)]));

    semverup(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "version number '1.2' in",
        ))
        .stderr(predicate::str::contains("is not a valid semver string"));
}

#[test]
fn test_version_file_not_tracked() {
    let temp_dir = TempDir::new().unwrap();
    Repository::init(temp_dir.path()).unwrap();
    fs::write(temp_dir.path().join("_version.py"), "__version__ = '1.0.0'\n").unwrap();

    semverup(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("version file not found"));
}

#[test]
fn test_malformed_entry() {
    let temp_dir = setup_repo("1.2.3", Some(&[("bad.yml", "title: x\ncategory: nonsense\n")]));
    let path = temp_dir.path().join(VERSION_FILE);
    let before = fs::read(&path).unwrap();

    let output = semverup(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.yml"))
        .get_output()
        .clone();

    // the yaml cause is reported once, under "Caused by"
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stderr.matches("unknown variant").count(), 1, "{}", stderr);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_version_at_maximum_patch() {
    let temp_dir = setup_repo("1.0.18446744073709551615", Some(&[("fix.yml", FIXED)]));
    let path = temp_dir.path().join(VERSION_FILE);
    let before = fs::read(&path).unwrap();

    semverup(temp_dir.path())
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains(
            "version number 1.0.18446744073709551615 cannot be bumped any further",
        ));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_library_run() {
    let temp_dir = setup_repo("0.9.9", Some(&[("fix.yml", FIXED)]));

    let version = semverup::run(temp_dir.path(), true).unwrap();
    assert_eq!(version, semver::Version::new(0, 9, 10));

    let err = semverup::run(TempDir::new().unwrap().path(), true).unwrap_err();
    assert!(matches!(err, semverup::error::SemverupError::NotARepository(_)));
}
