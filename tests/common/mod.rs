//! Shared test infrastructure for integration tests.

use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Runs the built binary against an isolated config directory.
pub struct TestFixture {
    pub config_dir: TempDir,
}

/// Captured result of one run.
#[derive(Debug)]
pub struct RunResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for RunResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

impl TestFixture {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            config_dir: TempDir::new()?,
        })
    }

    /// Fixture whose config directory holds `config.json` with `contents`.
    pub fn with_config(contents: &str) -> anyhow::Result<Self> {
        let fixture = Self::new()?;
        std::fs::write(fixture.config_dir.path().join("config.json"), contents)?;
        Ok(fixture)
    }

    pub fn config_path(&self) -> &Path {
        self.config_dir.path()
    }

    /// Run `heimdall --config <dir> <args>` with stdin detached so the
    /// interactive builder takes its non-TTY path.
    pub fn run(&self, args: &[&str]) -> anyhow::Result<RunResult> {
        let output = Command::new(env!("CARGO_BIN_EXE_heimdall"))
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .env_remove("HEIMDALL_LOG")
            .env_remove("HEIMDALL_LOG_LEVEL")
            .stdin(Stdio::null())
            .output()?;
        Ok(output.into())
    }
}
