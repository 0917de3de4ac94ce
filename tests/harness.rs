//! Shared fixtures for the CLI integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        self.add_bytes(path, content.as_bytes())
    }

    pub fn add_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    pub fn read(&self, path: &str) -> String {
        fs::read_to_string(self.dir.path().join(path)).expect("Failed to read output")
    }

    pub fn read_bytes(&self, path: &str) -> Vec<u8> {
        fs::read(self.dir.path().join(path)).expect("Failed to read output")
    }

    pub fn exists(&self, path: &str) -> bool {
        self.dir.path().join(path).exists()
    }
}

/// Command for one of the binaries, running inside `dir`.
pub fn tool(bin: &str, dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin(bin).expect("binary should be built");
    cmd.current_dir(dir.path());
    cmd
}

pub fn contents(dir: &TestDir) -> Command {
    tool("folder-contents", dir)
}

pub fn tree(dir: &TestDir) -> Command {
    tool("folder-tree", dir)
}
