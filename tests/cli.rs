//! Integration tests for the buildr binary

mod common;

use assert_cmd::Command;
use common::{create_demo_project, create_project, write_file};
use predicates::prelude::*;
use std::fs;

fn buildr() -> Command {
    let mut cmd = Command::cargo_bin("buildr").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_missing_command_exits_2() {
    buildr().assert().code(2);
}

#[test]
fn test_unknown_command_exits_2() {
    buildr()
        .arg("deploy")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("deploy"));
}

#[test]
fn test_run_demo_scenario() {
    let project = create_demo_project();
    let root = project.path();
    write_file(root, ".buildr/test/a.cmd.buildr", "echo {{.DATABASE_HOST}}");
    write_file(root, ".buildr/test/b.cmd.buildr", "echo done");

    let output = buildr()
        .current_dir(root)
        .arg("run")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    let host = stdout.find("db.demo.local").unwrap();
    let done = stdout.find("done").unwrap();
    assert!(host < done, "commands ran out of order:\n{}", stdout);
    assert!(stdout.contains("====> Executing script:"));
    assert!(stdout.contains("a.cmd.buildr"));
}

#[test]
fn test_command_output_is_printed_once() {
    let project = create_demo_project();
    write_file(
        project.path(),
        ".buildr/test/a.cmd.buildr",
        "echo marker-{{.DATABASE_HOST}}",
    );

    let output = buildr()
        .args(["-C", project.path().to_str().unwrap(), "run"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();

    assert_eq!(stdout.matches("marker-db.demo.local").count(), 1);
}

#[test]
fn test_failing_command_does_not_change_exit_code() {
    let project = create_demo_project();
    let root = project.path();
    write_file(root, ".buildr/test/a.cmd.buildr", "exit 7");
    write_file(root, ".buildr/test/b.cmd.buildr", "echo after-failure");

    buildr()
        .current_dir(root)
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("[ERROR]"))
        .stdout(predicate::str::contains("after-failure"));
}

#[test]
fn test_missing_descriptor_still_completes() {
    let project = create_project("project-name: demo\n");
    write_file(project.path(), ".buildr/test/a.cmd.buildr", "echo still-ran");

    buildr()
        .current_dir(project.path())
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("env.buildr"))
        .stdout(predicate::str::contains("still-ran"));
}

#[test]
fn test_environment_flag_selects_directory() {
    let project = create_demo_project();
    let root = project.path();
    write_file(root, ".buildr/test/a.cmd.buildr", "echo from-test");
    write_file(root, ".buildr/prod/env.buildr", "tier: production\n");
    write_file(root, ".buildr/prod/a.cmd.buildr", "echo from-{{.TIER}}");

    buildr()
        .current_dir(root)
        .args(["run", "-e", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("from-production"))
        .stdout(predicate::str::contains("from-test").not());
}

#[test]
fn test_silent_run_prints_only_command_output() {
    let project = create_demo_project();
    write_file(project.path(), ".buildr/test/a.cmd.buildr", "echo only-this");

    buildr()
        .current_dir(project.path())
        .args(["run", "-s"])
        .assert()
        .success()
        .stdout("only-this\n");
}

#[test]
fn test_build_env_writes_runfile() {
    let project = create_demo_project();

    buildr()
        .current_dir(project.path())
        .arg("build-env")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating Runfile..."))
        .stdout(predicate::str::contains("Done!"));

    let script = fs::read_to_string(project.path().join(".buildr/bin/Runfile")).unwrap();
    assert!(script.contains("DATABASE_HOST=\"db.demo.local\" go run *.go"));
}

#[test]
fn test_build_env_write_failure_exits_2() {
    let project = create_demo_project();
    write_file(project.path(), ".buildr/bin", "not a directory");

    buildr()
        .current_dir(project.path())
        .arg("build-env")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Runfile"));
}
