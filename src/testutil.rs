//! Test utilities for setting up throwaway projects.
//!
//! `TestProject` owns a temporary directory holding a `package.json`, with a
//! small builder API for adding source files and reading the manifest back.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tempfile::TempDir;

use crate::manifest::Manifest;

/// Isolated project directory for tests.
pub struct TestProject {
    /// Root temp directory (removed on drop).
    dir: TempDir,
}

impl TestProject {
    /// Create a project whose manifest is `manifest` serialized as JSON.
    pub fn new(manifest: Value) -> Self {
        let text = serde_json::to_string_pretty(&manifest).expect("serialize manifest");
        Self::with_raw_manifest(&text)
    }

    /// Create a project whose manifest file holds `contents` verbatim.
    pub fn with_raw_manifest(contents: &str) -> Self {
        let project = Self::empty();
        fs::write(project.manifest_path(), contents).expect("write manifest");
        project
    }

    /// Create a project with no manifest at all.
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    /// Add a file relative to the project root, creating parent directories.
    pub fn with_file(self, relative: &str, contents: &str) -> Self {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write file");
        self
    }

    /// Project root directory.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path to the project's manifest.
    pub fn manifest_path(&self) -> PathBuf {
        Manifest::path(self.root())
    }

    /// Raw manifest text.
    pub fn manifest_text(&self) -> String {
        fs::read_to_string(self.manifest_path()).expect("read manifest")
    }

    /// Manifest parsed as JSON.
    pub fn manifest_json(&self) -> Value {
        serde_json::from_str(&self.manifest_text()).expect("parse manifest")
    }

    /// Read a file relative to the project root, if present.
    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.root().join(relative)).ok()
    }

    /// Write an executable fake package manager that appends its argv to
    /// `calls.log` and exits with `exit_code`. Returns the command line to
    /// configure as the package manager.
    #[cfg(unix)]
    pub fn fake_package_manager(&self, exit_code: i32) -> String {
        let script = self.root().join("fake-pm.sh");
        let log = self.root().join("calls.log");
        let body = format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\nexit {exit_code}\n",
            log.display()
        );
        fs::write(&script, body).expect("write fake package manager");
        shell_words::join(["sh", &script.display().to_string()])
    }

    /// Lines recorded by the fake package manager.
    pub fn recorded_calls(&self) -> Vec<String> {
        self.read("calls.log")
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::TestProject;

    #[test]
    fn writes_manifest_and_files() {
        let project = TestProject::new(json!({ "name": "demo" }))
            .with_file("src/index.ts", "import x from 'x';\n");

        assert_eq!(project.manifest_json()["name"], "demo");
        assert!(project.read("src/index.ts").is_some());
        assert!(project.recorded_calls().is_empty());
    }
}
