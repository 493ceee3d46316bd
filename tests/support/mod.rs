//! Test support utilities for cfenv integration tests.
//!
//! Provides PEM fixtures, binding builders and a CLI test environment.

#![allow(dead_code)]

pub mod assertions;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use assert_cmd::Command;
use tempfile::TempDir;

/// CLI test environment with an isolated working directory.
///
/// No process-global state is mutated. Bindings are passed to the child
/// process through `.env()` so tests can safely run in parallel.
pub struct Test {
    /// Temporary working directory for files the test writes
    pub dir: TempDir,
    /// `VCAP_SERVICES` content, if any
    pub bindings: Option<String>,
}

impl Test {
    /// Environment with no service bindings.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        Self {
            dir,
            bindings: None,
        }
    }

    /// Environment with the given `VCAP_SERVICES` content.
    pub fn with_bindings(bindings: impl Into<String>) -> Self {
        let mut t = Self::new();
        t.bindings = Some(bindings.into());
        t
    }

    /// A cfenv command with the test's environment applied.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("cfenv").expect("failed to find cfenv binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("VCAP_SERVICES");
        cmd.env_remove("CFENV_LOG");
        cmd.env("NO_COLOR", "1");
        if let Some(bindings) = &self.bindings {
            cmd.env("VCAP_SERVICES", bindings);
        }
        cmd
    }

    /// Run cfenv with `args` and capture its output.
    pub fn run(&self, args: &[&str]) -> std::process::Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run cfenv")
    }

    /// Write a file into the working directory and return its path.
    pub fn write(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("failed to write file");
        path
    }
}
