//! CLI surface tests.
//!
//! Covers the one default invocation: exit code 0 with a completion
//! message on success, non-zero with the failing step's diagnostic
//! otherwise.

mod common;

use assert_cmd::Command;
use common::ProjectFixture;
use predicates::prelude::*;

fn cli(fixture: &ProjectFixture) -> Command {
    let mut cmd = Command::cargo_bin("release_packager").expect("binary builds");
    cmd.current_dir(fixture.path());
    cmd
}

#[test]
fn default_invocation_builds_the_package() {
    let fixture = ProjectFixture::new();

    cli(&fixture)
        .assert()
        .success()
        .stdout(predicate::str::contains("Package has been built."))
        .stdout(predicate::str::contains("acme-2.3.0.zip"));

    assert!(fixture.archive_path().is_file());
    assert!(!fixture.build_root().join("tmp").exists());
}

#[test]
fn missing_manifest_fails_with_a_diagnostic() {
    let fixture = ProjectFixture::empty();

    cli(&fixture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("package.json"));

    assert!(!fixture.build_root().exists());
}

#[test]
fn missing_sources_fail_during_staging() {
    let fixture = ProjectFixture::new();
    std::fs::remove_dir_all(fixture.path().join("system-configuration")).unwrap();

    cli(&fixture)
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"))
        .stderr(predicate::str::contains("system-configuration"));

    assert!(!fixture.archive_path().exists());
}

#[test]
fn custom_build_dir_is_honored() {
    let fixture = ProjectFixture::new();

    cli(&fixture)
        .args(["--build-dir", "out"])
        .assert()
        .success();

    assert!(
        fixture
            .path()
            .join("out/installer-2.3.0/acme-2.3.0.zip")
            .is_file()
    );
    assert!(!fixture.build_root().exists());
}
