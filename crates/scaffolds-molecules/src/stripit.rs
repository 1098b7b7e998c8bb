//! Scaffold decomposition using strip-it.

use async_trait::async_trait;
use scaffolds_common::error::{Result, ScaffoldError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// How a single decomposition run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    Success,
    /// Non-zero exit, or killed by a signal (`code` is `None`).
    Failed { code: Option<i32>, stderr: String },
}

impl ToolStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ToolStatus::Success)
    }
}

/// A batch decomposition tool that reads ligands from `input` and writes a scaffold table to `output`.
///
/// A failed run may still leave a partial table behind in `output`.
#[async_trait]
pub trait Decomposer: Send + Sync {
    async fn decompose(&self, input: &Path, output: &Path) -> Result<ToolStatus>;
}

/// Wrapper for strip-it execution.
pub struct StripItRunner {
    executable_path: PathBuf,
    input_format: String,
}

impl StripItRunner {
    /// Create a new StripItRunner reading SMILES input.
    pub fn new<P: AsRef<Path>>(executable_path: P) -> Self {
        Self {
            executable_path: executable_path.as_ref().to_path_buf(),
            input_format: "smiles".to_string(),
        }
    }

    pub fn with_input_format(mut self, input_format: &str) -> Self {
        self.input_format = input_format.to_string();
        self
    }
}

#[async_trait]
impl Decomposer for StripItRunner {
    /// Run strip-it and wait for it. No timeout is applied.
    async fn decompose(&self, input: &Path, output: &Path) -> Result<ToolStatus> {
        info!("Performing strip-it on {:?} into {:?}", input, output);

        let result = Command::new(&self.executable_path)
            .arg("--inputFormat")
            .arg(&self.input_format)
            .arg("--input")
            .arg(input)
            .arg("--output")
            .arg(output)
            .output()
            .await
            .map_err(|e| {
                ScaffoldError::Tool(format!("failed to run {:?}: {}", self.executable_path, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            warn!(code = ?result.status.code(), "strip-it failed: {}", stderr);
            return Ok(ToolStatus::Failed { code: result.status.code(), stderr });
        }

        debug!("strip-it completed successfully. Output in {:?}", output);
        Ok(ToolStatus::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_executable_is_tool_error() {
        let dir = tempfile::tempdir().unwrap();
        let runner = StripItRunner::new(dir.path().join("no-such-strip-it"));
        let err = runner
            .decompose(&dir.path().join("in"), &dir.path().join("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Tool(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");

        let ok = StripItRunner::new("true").decompose(&input, &output).await.unwrap();
        assert!(ok.is_success());

        let failed = StripItRunner::new("false").decompose(&input, &output).await.unwrap();
        assert!(matches!(failed, ToolStatus::Failed { code: Some(1), .. }));
    }
}
