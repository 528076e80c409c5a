//! CLI integration tests using assert_cmd
//!
//! These tests verify the CLI commands work correctly end-to-end.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <artifactId>camel-hello</artifactId>
    <version>1.0-SNAPSHOT</version>
</project>
"#;

/// Get a command instance for the apikit binary
fn apikit_cmd() -> Command {
    Command::cargo_bin("apikit").expect("Failed to find apikit binary")
}

/// Project with a bare pom and an `apikit.toml` keeping state inside the temp dir
fn create_project() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("pom.xml"), POM).expect("Failed to write pom");
    let settings = format!(
        "local_repository = {:?}\nbackup_dir = {:?}\n",
        dir.path().join("m2").display().to_string(),
        dir.path().join("backups").display().to_string(),
    );
    fs::write(dir.path().join("apikit.toml"), settings).expect("Failed to write settings");
    dir
}

fn run(dir: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    apikit_cmd().arg("--project").arg(dir).args(args).assert()
}

fn setup_project() -> TempDir {
    let dir = create_project();
    run(
        dir.path(),
        &[
            "setup",
            "--name",
            "Hello",
            "--scheme",
            "hello",
            "--package",
            "org.example.hello",
            "--camel-version",
            "2.17.0",
        ],
    )
    .success()
    .stdout(predicate::str::contains(
        "Command 'Api Component: Setup' successfully executed!",
    ));
    dir
}

fn pom(dir: &Path) -> String {
    fs::read_to_string(dir.join("pom.xml")).expect("Failed to read pom")
}

#[test]
fn test_help_command() {
    apikit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "apikit - Camel API component project configuration",
        ));
}

#[test]
fn test_exclude_help_lists_targets() {
    apikit_cmd()
        .args(["exclude", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("javadoc-methods"))
        .stdout(predicate::str::contains("config-names"));
}

#[test]
fn test_missing_pom() {
    let dir = TempDir::new().unwrap();
    run(dir.path(), &["api", "list"])
        .failure()
        .stderr(predicate::str::contains("Error: No pom.xml found"));
}

#[test]
fn test_setup_creates_component() {
    let dir = setup_project();
    assert!(pom(dir.path()).contains("<artifactId>camel-api-component-maven-plugin</artifactId>"));
    assert!(dir
        .path()
        .join("src/main/java/org/example/hello/HelloEndpoint.java")
        .exists());

    run(
        dir.path(),
        &["setup", "--name", "Hello", "--scheme", "hello", "--package", "org.example.hello"],
    )
    .success()
    .stdout(predicate::str::contains("Api Component is already setup!"));
}

#[test]
fn test_add_and_list_api() {
    let dir = setup_project();
    run(
        dir.path(),
        &["api", "add", "testApi", "--proxy-class", "org.example.hello.api.HelloApi"],
    )
    .success()
    .stdout(predicate::str::contains(
        "Command 'Api Component: Add Api' successfully executed!",
    ));

    run(dir.path(), &["api", "list", "--json"])
        .success()
        .stdout(predicate::str::contains("\"count\": 1"))
        .stdout(predicate::str::contains("\"apiName\": \"testApi\""));

    run(
        dir.path(),
        &["api", "add", "testApi", "--proxy-class", "org.example.Other"],
    )
    .failure()
    .stderr(predicate::str::contains("Error: Duplicate API name testApi"));
}

#[test]
fn test_scoped_commands() {
    let dir = setup_project();
    run(
        dir.path(),
        &["api", "add", "testApi", "--proxy-class", "org.example.hello.api.HelloApi"],
    )
    .success();

    run(
        dir.path(),
        &[
            "option",
            "extra",
            "--name",
            "names",
            "--type",
            "java.util.List<String>",
            "--api",
            "testApi",
        ],
    )
    .success();
    run(
        dir.path(),
        &["alias", "--method-pattern", "^get(.+)$", "--method-alias", "$1"],
    )
    .success();
    run(
        dir.path(),
        &["substitution", "--arg-name", "^id$", "--replacement", "$1Id", "--api", "testApi"],
    )
    .success();

    let content = pom(dir.path());
    assert!(content.contains("<![CDATA[java.util.List<String>]]>"));
    assert!(content.contains("<methodAlias>$1</methodAlias>"));
    assert!(content.contains("<method>^.+$</method>"));

    run(
        dir.path(),
        &["alias", "--method-pattern", "a", "--method-alias", "b", "--api", "nope"],
    )
    .failure()
    .stderr(predicate::str::contains("Error: Missing API name nope"));

    run(
        dir.path(),
        &["alias", "--method-pattern", "a", "--method-alias", "b", "--api", ""],
    )
    .failure()
    .stderr(predicate::str::contains("--api"))
    .stderr(predicate::str::contains("Missing API name").not());
}

#[test]
fn test_exclude_append_and_replace() {
    let dir = setup_project();
    run(dir.path(), &["exclude", "config-names", "foo"]).success();
    run(dir.path(), &["exclude", "config-names", "bar"]).success();
    assert!(pom(dir.path()).contains("<excludeConfigNames>(foo)|(bar)</excludeConfigNames>"));

    run(dir.path(), &["exclude", "config-names", "baz", "--append", "false"])
        .success()
        .stdout(predicate::str::contains("Api Component: Exclude Config Names"));
    assert!(pom(dir.path()).contains("<excludeConfigNames>baz</excludeConfigNames>"));
}

#[test]
fn test_dry_run_leaves_pom() {
    let dir = setup_project();
    let before = pom(dir.path());

    run(
        dir.path(),
        &["api", "add", "testApi", "--proxy-class", "org.example.Api", "--dry-run"],
    )
    .success()
    .stdout(predicate::str::contains("+"))
    .stdout(predicate::str::contains("Dry run - no changes made."));
    assert_eq!(pom(dir.path()), before);
}

#[test]
fn test_json_output_and_rollback() {
    let dir = setup_project();
    let before = pom(dir.path());

    let output = apikit_cmd()
        .arg("--project")
        .arg(dir.path())
        .args(["api", "add", "testApi", "--proxy-class", "org.example.Api", "--json"])
        .output()
        .expect("Failed to run apikit");
    assert!(output.status.success());
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(result["operation"], "add-api");
    let backup_id = result["backup_id"].as_str().unwrap().to_string();
    assert_ne!(pom(dir.path()), before);

    run(dir.path(), &["rollback", &backup_id])
        .success()
        .stdout(predicate::str::contains("Rolled back 1 files."));
    assert_eq!(pom(dir.path()), before);
}

#[test]
fn test_complete_api_names() {
    let dir = setup_project();
    for name in ["alpha", "beta", "alphabet"] {
        run(dir.path(), &["api", "add", name, "--proxy-class", "org.example.Api"]).success();
    }

    run(dir.path(), &["complete", "api-name", "alp"])
        .success()
        .stdout(predicate::str::contains("alpha\n"))
        .stdout(predicate::str::contains("alphabet\n"))
        .stdout(predicate::str::contains("beta").not());
}

#[test]
fn test_complete_camel_versions() {
    let dir = create_project();
    for version in ["2.16.0", "2.17.0.redhat-630187", "2.18.1", "2.19.0-SNAPSHOT"] {
        fs::create_dir_all(dir.path().join("m2/org/apache/camel/camel-core").join(version))
            .expect("Failed to create version dir");
    }

    run(dir.path(), &["complete", "camel-version", "2.1"])
        .success()
        .stdout("2.16.0\n2.17.0.redhat-630187\n2.18.1\n");
    run(dir.path(), &["complete", "camel-version", "--latest"])
        .success()
        .stdout("2.18.1\n");
    run(dir.path(), &["complete", "camel-version", "--latest", "--redhat"])
        .success()
        .stdout("2.17.0.redhat-630187\n");
    run(dir.path(), &["complete", "camel-version", "--redhat"])
        .success()
        .stdout("2.17.0.redhat-630187\n");
}
