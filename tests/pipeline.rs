//! Integration tests for the library pipeline

mod common;

use buildr::config::{EnvironmentMap, Layout};
use buildr::runner::pipeline::{build_env, resolve, run};
use buildr::runner::{
    collect_commands, CollectPolicy, Context, FsCommandSource, Verbosity,
};
use common::{create_demo_project, create_project, write_file};
use serde_yaml::Value;
use std::fs;

fn ctx_for(layout: &Layout) -> Context {
    Context::new()
        .with_working_dir(layout.root().to_path_buf())
        .with_verbosity(Verbosity::Silent)
}

#[test]
fn test_resolve_demo_environment() {
    let project = create_demo_project();
    let layout = Layout::new(project.path(), "test");

    let resolved = resolve(&layout, &ctx_for(&layout));
    assert_eq!(resolved.properties.project_name, "demo");
    assert_eq!(resolved.env.len(), 1);
    assert_eq!(
        resolved.env.get("DATABASE_HOST"),
        Some(&Value::from("db.demo.local"))
    );
}

#[test]
fn test_missing_properties_still_resolve() {
    let project = create_project("");
    fs::remove_file(project.path().join(".buildr.properties")).unwrap();
    write_file(project.path(), ".buildr/test/env.buildr", "api-port: 8080\n");
    let layout = Layout::new(project.path(), "test");

    let resolved = resolve(&layout, &ctx_for(&layout));
    assert_eq!(resolved.properties.project_name, "");
    assert_eq!(resolved.env.get("API_PORT"), Some(&Value::from(8080)));
}

#[test]
fn test_run_executes_commands_in_order() {
    let project = create_demo_project();
    let root = project.path();
    write_file(
        root,
        ".buildr/test/a.cmd.buildr",
        "echo {{.DATABASE_HOST}} >> out.txt",
    );
    write_file(root, ".buildr/test/b.cmd.buildr", "echo done >> out.txt");
    let layout = Layout::new(root, "test");

    run(
        &layout,
        &FsCommandSource,
        CollectPolicy::BestEffort,
        &ctx_for(&layout),
    );

    let out = fs::read_to_string(root.join("out.txt")).unwrap();
    assert_eq!(out, "db.demo.local\ndone\n");
}

#[test]
fn test_run_without_descriptor_uses_empty_context() {
    let project = create_project("project-name: demo\n");
    let root = project.path();
    write_file(root, ".buildr/test/a.cmd.buildr", "echo plain >> out.txt");
    write_file(
        root,
        ".buildr/test/b.cmd.buildr",
        "echo {{.DATABASE_HOST}} >> out.txt",
    );
    let layout = Layout::new(root, "test");

    let resolved = resolve(&layout, &ctx_for(&layout));
    assert!(resolved.env.is_empty());

    run(
        &layout,
        &FsCommandSource,
        CollectPolicy::BestEffort,
        &ctx_for(&layout),
    );

    let out = fs::read_to_string(root.join("out.txt")).unwrap();
    assert_eq!(out, "plain\n");
}

#[test]
fn test_path_key_does_not_break_commands() {
    let project = create_project("project-name: demo\n");
    let root = project.path();
    write_file(root, ".buildr/test/env.buildr", "path: /api/v1\n");
    write_file(root, ".buildr/test/a.cmd.buildr", "echo ran >> out.txt");
    let layout = Layout::new(root, "test");

    for export in [false, true] {
        let ctx = ctx_for(&layout).with_export_env(export);
        run(&layout, &FsCommandSource, CollectPolicy::BestEffort, &ctx);
    }

    let out = fs::read_to_string(root.join("out.txt")).unwrap();
    assert_eq!(out, "ran\nran\n");
}

#[test]
fn test_fail_fast_runs_nothing() {
    let project = create_demo_project();
    let root = project.path();
    write_file(root, ".buildr/test/a.cmd.buildr", "echo a >> out.txt");
    write_file(root, ".buildr/test/b.cmd.buildr", "echo {{.NOPE}} >> out.txt");
    let layout = Layout::new(root, "test");

    run(
        &layout,
        &FsCommandSource,
        CollectPolicy::FailFast,
        &ctx_for(&layout),
    );

    assert!(!root.join("out.txt").exists());
}

#[test]
fn test_collection_is_deterministic() {
    let project = create_demo_project();
    let root = project.path();
    for name in ["m", "b", "z", "a", "sub/c", "sub/a"] {
        write_file(
            root,
            &format!(".buildr/test/{}.cmd.buildr", name),
            &format!("echo {}", name),
        );
    }
    let layout = Layout::new(root, "test");
    let ctx = ctx_for(&layout);
    let env = EnvironmentMap::new();

    let collect = || {
        collect_commands(
            &FsCommandSource,
            &layout.env_dir(),
            &env,
            CollectPolicy::BestEffort,
            &ctx,
        )
        .unwrap()
    };

    let first = collect();
    let bodies: Vec<&str> = first.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(
        bodies,
        vec!["echo a", "echo b", "echo m", "echo sub/a", "echo sub/c", "echo z"]
    );
    assert_eq!(first, collect());
}

#[test]
fn test_build_env_writes_runfile() {
    let project = create_project("project-name: demo\nrun-command: ./server\n");
    let root = project.path();
    write_file(
        root,
        ".buildr/test/env.buildr",
        "database-host: db.{{project-name}}.local\nport: 5432\n",
    );
    let layout = Layout::new(root, "test");

    build_env(&layout, &ctx_for(&layout)).unwrap();

    let script = fs::read_to_string(layout.runfile()).unwrap();
    assert!(script.starts_with("#!/bin/bash\n"));
    assert!(script.ends_with("DATABASE_HOST=\"db.demo.local\" PORT=\"5432\" ./server\n"));
}

#[test]
fn test_build_env_write_failure_is_an_error() {
    let project = create_demo_project();
    let root = project.path();
    write_file(root, ".buildr/bin", "not a directory");
    let layout = Layout::new(root, "test");

    assert!(build_env(&layout, &ctx_for(&layout)).is_err());
}
