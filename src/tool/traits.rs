//! Trait for the external media tool boundary

use crate::error::Result;
use crate::types::TrackMetadata;
use async_trait::async_trait;

/// Trait for the external extraction/download tool
///
/// This trait defines the interface between the orchestrator and the tool
/// that actually talks to media sites. Implementations can shell out to a
/// binary, or provide stubs for tests.
///
/// # Examples
///
/// ```no_run
/// use audio_dl::tool::{CliYtDlp, MediaTool};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tool = CliYtDlp::from_path().expect("yt-dlp binary not found");
/// let metadata = tool.probe("https://www.youtube.com/watch?v=example").await?;
/// println!("duration: {:?}", metadata.duration);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Resolve extraction metadata for a URL without downloading
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be executed, exits with a failure,
    /// or produces output that cannot be decoded.
    async fn probe(&self, url: &str) -> Result<TrackMetadata>;

    /// Fetch a stream using a prepared argument vector
    ///
    /// The arguments (including the URL and destination) are built by
    /// [`options::fetch_args`](crate::options::fetch_args); the tool is
    /// responsible for writing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be executed or exits with a
    /// failure.
    async fn fetch(&self, args: &[String]) -> Result<()>;

    /// Short implementation name for logging
    fn name(&self) -> &'static str;
}
