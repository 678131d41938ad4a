//! CLI-based media tool using the external yt-dlp binary

use super::parser::{ExitStatus, parse_probe_output};
use super::traits::MediaTool;
use crate::error::{Error, Result};
use crate::options;
use crate::types::TrackMetadata;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Media tool backed by the external `yt-dlp` binary
///
/// All site extraction, format negotiation, and network handling happen
/// inside yt-dlp; this type only spawns it and interprets the output.
///
/// # Examples
///
/// ```no_run
/// use audio_dl::tool::{CliYtDlp, MediaTool};
/// use std::path::PathBuf;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Create with explicit path
/// let tool = CliYtDlp::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let tool = CliYtDlp::from_path().expect("yt-dlp not found in PATH");
///
/// let metadata = tool.probe("https://www.youtube.com/watch?v=example").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CliYtDlp {
    binary_path: PathBuf,
}

impl CliYtDlp {
    /// Create a new handle with an explicit binary path
    ///
    /// # Arguments
    ///
    /// * `binary_path` - Path to the yt-dlp binary
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find yt-dlp in PATH
    ///
    /// Uses the `which` crate to search for the `yt-dlp` binary in the system
    /// PATH.
    ///
    /// # Returns
    ///
    /// `Some(CliYtDlp)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }

    /// Path of the wrapped binary
    #[must_use]
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    /// Query the tool's version (first line of `--version` output)
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExternalTool`] if the binary cannot be executed or
    /// exits with a failure.
    pub async fn version(&self) -> Result<String> {
        let output = self.run(&["--version".to_string()]).await?;
        if !output.status.success() {
            return Err(Error::ExternalTool(format!(
                "yt-dlp --version exited with {}",
                describe_exit(&output.status)
            )));
        }
        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        Ok(version)
    }

    async fn run(&self, args: &[String]) -> Result<std::process::Output> {
        debug!(binary = ?self.binary_path, ?args, "spawning yt-dlp");
        Command::new(&self.binary_path)
            .args(args)
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("failed to execute yt-dlp: {e}")))
    }
}

#[async_trait]
impl MediaTool for CliYtDlp {
    async fn probe(&self, url: &str) -> Result<TrackMetadata> {
        let args = options::probe_args(url);
        let output = self.run(&args).await?;
        parse_probe_output(
            url,
            &output.stdout,
            &output.stderr,
            ExitStatus::from(output.status.success()),
        )
    }

    async fn fetch(&self, args: &[String]) -> Result<()> {
        let output = self.run(args).await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .next_back()
                .unwrap_or("no error output");
            return Err(Error::ExternalTool(format!(
                "yt-dlp exited with {}: {}",
                describe_exit(&output.status),
                detail
            )));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cli-yt-dlp"
    }
}

fn describe_exit(status: &std::process::ExitStatus) -> String {
    match status.code() {
        Some(code) => format!("code {code}"),
        None => "signal".to_string(),
    }
}
