//! Filesystem validation tests with temporary project fixtures.

use std::fs;

use packlay::{
    compose, validate_fs, ConfigError, ConfigValidator, FsValidator, Mode, ProjectRoot,
};
use tempfile::TempDir;

fn project_with_sources() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("src")).expect("mkdir src");
    fs::write(dir.path().join("src/index.js"), "export default {}\n").expect("write entry");
    fs::write(dir.path().join("index.html"), "<!doctype html>\n").expect("write template");
    dir
}

#[test]
fn fs_validator_accepts_complete_project() {
    let dir = project_with_sources();
    let root = ProjectRoot::new(dir.path()).unwrap();
    let config = compose(Mode::Production, &root).unwrap();

    assert!(validate_fs(&config, dir.path()).is_ok());
}

#[test]
fn fs_validator_rejects_missing_entry() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("index.html"), "<!doctype html>\n").expect("write template");

    let root = ProjectRoot::new(dir.path()).unwrap();
    let config = compose(Mode::Development, &root).unwrap();

    let err = validate_fs(&config, dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::EntryNotFound { .. }));
}

#[test]
fn fs_validator_rejects_missing_template() {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("src")).expect("mkdir src");
    fs::write(dir.path().join("src/index.js"), "export default {}\n").expect("write entry");

    let root = ProjectRoot::new(dir.path()).unwrap();
    let config = compose(Mode::Development, &root).unwrap();

    let err = FsValidator::new(dir.path()).validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::TemplateNotFound { .. }));
}

#[test]
fn fs_validator_runs_schema_checks_first() {
    let dir = project_with_sources();
    let root = ProjectRoot::new(dir.path()).unwrap();
    let mut config = compose(Mode::Development, &root).unwrap();
    config.output.filename.clear();

    let err = validate_fs(&config, dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::MissingField { field } if field == "output.filename"));
}
