//! Common test utilities

use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Create a project with `.buildr.properties` and an empty `test` environment
pub fn create_project(properties: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join(".buildr.properties"), properties).unwrap();
    fs::create_dir_all(temp_dir.path().join(".buildr/test")).unwrap();
    temp_dir
}

/// Write a file relative to the project root, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// The `demo` project used by most scenarios
pub fn create_demo_project() -> TempDir {
    let project = create_project("project-name: demo\n");
    write_file(
        project.path(),
        ".buildr/test/env.buildr",
        "database-host: db.{{project-name}}.local\n",
    );
    project
}
