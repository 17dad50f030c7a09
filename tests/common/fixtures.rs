//! Response bodies and workspace setup used across integration tests

#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary workspace holding response bodies and an isolated config directory.
/// The TempDir must be kept alive for the duration of the test.
pub struct TestWorkspace {
    pub temp_dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.path().join("config")
    }

    /// Write `body` as JSON and return its path
    pub fn write_json(&self, name: &str, body: &Value) -> anyhow::Result<PathBuf> {
        let path = self.path().join(name);
        std::fs::write(&path, serde_json::to_string_pretty(body)?)?;
        Ok(path)
    }

    pub fn write_config(&self, config: &Value) -> anyhow::Result<()> {
        std::fs::create_dir_all(self.config_dir())?;
        std::fs::write(
            self.config_dir().join("config.json"),
            serde_json::to_string_pretty(config)?,
        )?;
        Ok(())
    }

    /// The binary with its config directory pointed into this workspace
    pub fn command(&self) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("coverage-navigator")?;
        cmd.env("COVERAGE_NAVIGATOR_CONFIG_DIR", self.config_dir())
            .env_remove("RUST_LOG");
        Ok(cmd)
    }
}

pub fn repository_body() -> Value {
    json!({
        "owner": {
            "repository": {
                "__typename": "Repository",
                "private": false,
                "defaultBranch": "main",
                "coverageEnabled": true,
                "internalId": 1234
            }
        }
    })
}

pub fn not_found_body() -> Value {
    json!({
        "owner": {
            "repository": {"__typename": "NotFoundError", "message": "repo not found"}
        }
    })
}

pub fn owner_not_activated_body() -> Value {
    json!({
        "owner": {
            "repository": {"__typename": "OwnerNotActivatedError", "message": "owner not activated"}
        }
    })
}
