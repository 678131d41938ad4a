//! Core downloader orchestration
//!
//! [`AudioDownloader`] sequences the one-pass pipeline: metadata probe,
//! destination resolution, fetch invocation, result construction, optional
//! sidecar write. There is no queueing, retrying, or concurrency here; the
//! single external call boundary is the [`MediaTool`].

use crate::config::Config;
use crate::error::{Error, FilesystemError, Result};
use crate::options;
use crate::paths::PathResolver;
use crate::tool::{CliYtDlp, MediaTool};
use crate::types::{DownloadResult, TrackMetadata};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main downloader instance (cloneable - all fields are Arc-wrapped or cheap)
#[derive(Clone)]
pub struct AudioDownloader {
    /// Configuration (wrapped in Arc for sharing across tasks)
    config: Arc<Config>,
    /// Destination path resolver for the configured save policy
    resolver: PathResolver,
    /// External tool boundary (trait object for pluggable implementations)
    tool: Arc<dyn MediaTool>,
}

impl AudioDownloader {
    /// Create a downloader backed by the yt-dlp CLI
    ///
    /// Validates the configuration, ensures the output directory exists, and
    /// locates the binary: an explicit `ytdlp_path` wins if it exists,
    /// otherwise PATH is searched when `search_path` is enabled.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings,
    /// [`Error::ToolNotFound`] if no usable binary is found, or a filesystem
    /// error if the output directory cannot be created.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let tool = discover_tool(&config)?;
        Self::with_tool(config, Arc::new(tool))
    }

    /// Create a downloader with a custom [`MediaTool`] implementation
    ///
    /// This is the seam used by tests and by embedders that manage the tool
    /// binary themselves.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings or a filesystem
    /// error if the output directory cannot be created.
    pub fn with_tool(config: Config, tool: Arc<dyn MediaTool>) -> Result<Self> {
        config.validate()?;
        let resolver = PathResolver::new(config.save.clone());
        resolver.ensure_base_directory()?;
        Ok(Self {
            config: Arc::new(config),
            resolver,
            tool,
        })
    }

    /// Access the configuration
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve extraction metadata for a URL without downloading
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] for malformed or non-http(s) URLs, or a
    /// metadata error when the tool cannot resolve the URL.
    pub async fn probe(&self, url: &str) -> Result<TrackMetadata> {
        validate_media_url(url)?;
        debug!(url, tool = self.tool.name(), "probing metadata");
        self.tool.probe(url).await
    }

    /// Download the audio stream at `url`
    ///
    /// Every operational failure (bad URL, extraction failure, collision,
    /// tool exit, missing output) is folded into a failed [`DownloadResult`]
    /// rather than an `Err`, so the record is the single source of truth for
    /// callers.
    pub async fn download(&self, url: &str) -> DownloadResult {
        let metadata = match self.probe(url).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(url, error = %e, "metadata probe failed");
                return DownloadResult::from_error("unknown", "unknown", e.to_string());
            }
        };

        info!(track_id = %metadata.id, title = %metadata.title, "starting download");
        match self.fetch_track(url, &metadata).await {
            Ok(result) => result,
            Err(e) => {
                warn!(track_id = %metadata.id, url, error = %e, "download failed");
                DownloadResult::from_error(&metadata.id, &metadata.title, e.to_string())
            }
        }
    }

    /// Run the fetch stage for already-probed metadata
    async fn fetch_track(&self, url: &str, metadata: &TrackMetadata) -> Result<DownloadResult> {
        let destination = self
            .resolver
            .resolve_destination(metadata, self.config.audio_extension())?;
        let args = options::fetch_args(&self.config, url, &destination);

        self.tool.fetch(&args).await?;

        let file_size = tokio::fs::metadata(&destination)
            .await
            .map_err(|_| {
                Error::Filesystem(FilesystemError::OutputMissing {
                    path: destination.clone(),
                })
            })?
            .len();

        let result = DownloadResult::from_success(metadata, destination, file_size)?;

        if self.config.save.write_result_file {
            match result.write_sidecar(None).await {
                Ok(sidecar) => debug!(track_id = %result.track_id, ?sidecar, "result sidecar written"),
                Err(e) => {
                    // A failed sidecar never fails the download itself
                    warn!(track_id = %result.track_id, error = %e, "failed to write result sidecar");
                }
            }
        }

        info!(
            track_id = %result.track_id,
            path = ?result.file_path,
            size_bytes = file_size,
            "download complete"
        );
        Ok(result)
    }
}

/// Locate the yt-dlp binary per the tools configuration
fn discover_tool(config: &Config) -> Result<CliYtDlp> {
    if let Some(path) = &config.tools.ytdlp_path {
        if path.exists() {
            return Ok(CliYtDlp::new(path.clone()));
        }
        warn!(?path, "configured yt-dlp path does not exist, falling back to PATH search");
    }

    if config.tools.search_path {
        if let Some(tool) = CliYtDlp::from_path() {
            debug!(path = ?tool.binary_path(), "discovered yt-dlp on PATH");
            return Ok(tool);
        }
    }

    Err(Error::ToolNotFound {
        tool: "yt-dlp".to_string(),
    })
}

/// Validate that a media URL is well-formed http(s)
fn validate_media_url(url_str: &str) -> Result<()> {
    let parsed = url::Url::parse(url_str)
        .map_err(|_| Error::InvalidUrl(format!("not a valid URL: {url_str}")))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(Error::InvalidUrl(format!(
            "URL scheme '{scheme}' is not supported; only http and https are"
        ))),
    }
}
