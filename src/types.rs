//! Core types for audio-dl

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Metadata resolved for a single track
///
/// This is the subset of the external tool's info record that the library
/// consumes. Unknown fields in the tool's output are ignored during
/// deserialization.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Track identifier assigned by the source site
    pub id: String,

    /// Track title
    pub title: String,

    /// Full name of the uploader / channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    /// Length of the track in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,

    /// Upload date in UTC (YYYYMMDD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,

    /// Canonical URL of the track's webpage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webpage_url: Option<String>,

    /// Extractor that resolved the URL (e.g. "youtube")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
}

impl TrackMetadata {
    /// Duration rounded to whole seconds, if known
    pub fn duration_seconds(&self) -> Option<u64> {
        self.duration.map(|d| d.max(0.0).round() as u64)
    }
}

/// Outcome of a single download attempt
///
/// Exactly one of `file_path` (success) or `error_message` (failure) is
/// populated; [`DownloadResult::validate`] enforces this coherence. `None`
/// fields are omitted from the serialized form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadResult {
    /// Whether the download completed successfully
    pub success: bool,

    /// Track identifier ("unknown" when the probe itself failed)
    pub track_id: String,

    /// Track title ("unknown" when the probe itself failed)
    pub title: String,

    /// Path of the downloaded audio file, if successful
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<PathBuf>,

    /// Error message, if the download failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    /// Track duration in whole seconds, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u64>,

    /// Size of the downloaded file in bytes, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size_bytes: Option<u64>,

    /// Name of the uploader, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    /// Upload date in UTC (YYYYMMDD), if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_date: Option<String>,

    /// When the attempt finished (successfully or not)
    pub completed_at: DateTime<Utc>,
}

impl DownloadResult {
    /// Build a successful result from probed metadata and the written file
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResult`] if the file does not exist on disk or
    /// if the record fails cross-field validation.
    pub fn from_success(
        metadata: &TrackMetadata,
        file_path: PathBuf,
        file_size_bytes: u64,
    ) -> Result<Self> {
        if !file_path.exists() {
            return Err(Error::InvalidResult(format!(
                "file does not exist: {}",
                file_path.display()
            )));
        }

        let result = Self {
            success: true,
            track_id: metadata.id.clone(),
            title: metadata.title.clone(),
            file_path: Some(file_path),
            error_message: None,
            duration_seconds: metadata.duration_seconds(),
            file_size_bytes: Some(file_size_bytes),
            uploader: metadata.uploader.clone(),
            upload_date: metadata.upload_date.clone(),
            completed_at: Utc::now(),
        };
        result.validate()?;
        Ok(result)
    }

    /// Build a failed result
    ///
    /// Empty identifiers are normalized to `"unknown"` so the record always
    /// passes validation.
    pub fn from_error(track_id: &str, title: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            track_id: or_unknown(track_id),
            title: or_unknown(title),
            file_path: None,
            error_message: Some(error.into()),
            duration_seconds: None,
            file_size_bytes: None,
            uploader: None,
            upload_date: None,
            completed_at: Utc::now(),
        }
    }

    /// Check cross-field coherence of the record
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResult`] if identifiers are empty, a successful
    /// record has no file path, or a failed record has no error message.
    pub fn validate(&self) -> Result<()> {
        if self.track_id.is_empty() {
            return Err(Error::InvalidResult("track_id must not be empty".to_string()));
        }
        if self.title.is_empty() {
            return Err(Error::InvalidResult("title must not be empty".to_string()));
        }
        if self.success && self.file_path.is_none() {
            return Err(Error::InvalidResult(
                "file_path is required when success is true".to_string(),
            ));
        }
        if !self.success && self.error_message.is_none() {
            return Err(Error::InvalidResult(
                "error_message is required when success is false".to_string(),
            ));
        }
        Ok(())
    }

    /// Persist the record as a JSON sidecar file
    ///
    /// With no explicit `output_path` the sidecar lands next to the audio
    /// file, with a `.json` extension. Parent directories are created as
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResult`] for failed records (there is no
    /// meaningful location for their sidecar), or an I/O error if the write
    /// fails.
    pub async fn write_sidecar(&self, output_path: Option<&Path>) -> Result<PathBuf> {
        let file_path = match &self.file_path {
            Some(path) if self.success => path,
            _ => {
                return Err(Error::InvalidResult(
                    "cannot write a sidecar for a failed download".to_string(),
                ));
            }
        };

        let sidecar = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| file_path.with_extension("json"));

        if let Some(parent) = sidecar.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&sidecar, json).await?;
        Ok(sidecar)
    }
}

fn or_unknown(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        "unknown".to_string()
    } else {
        trimmed.to_string()
    }
}
