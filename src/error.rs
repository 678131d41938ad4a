//! Error types for audio-dl
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types (Metadata, Filesystem)
//! - Context information (configuration key, file path, tool output)
//!
//! Operational failures during a download are normally folded into a failed
//! [`DownloadResult`](crate::types::DownloadResult); these types surface when
//! callers use the fallible APIs directly.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for audio-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for audio-dl
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "output_dir")
        key: Option<String>,
    },

    /// Metadata extraction error
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Filesystem error (directory layout, collisions, missing output)
    #[error("filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),

    /// External tool execution failed (spawn failure, non-zero exit)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// The external tool binary could not be located
    #[error("{tool} not found: set an explicit path or install it on PATH")]
    ToolNotFound {
        /// Name of the missing binary
        tool: String,
    },

    /// The media URL is malformed or uses an unsupported scheme
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A result record failed cross-field validation
    #[error("invalid result: {0}")]
    InvalidResult(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Build a [`Error::Config`] with a keyed context
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Metadata extraction errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The tool could not resolve the URL into an info record
    #[error("extraction failed for {url}: {reason}")]
    ExtractionFailed {
        /// The media URL that was probed
        url: String,
        /// Failure description, typically the tool's last stderr line
        reason: String,
    },

    /// The tool exited successfully but produced no output
    #[error("tool produced no metadata output")]
    EmptyOutput,

    /// The tool's info output was not valid JSON
    #[error("malformed info JSON: {0}")]
    MalformedJson(String),
}

/// Filesystem errors raised during path resolution and output handling
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// A directory could not be created
    #[error("failed to create directory {path}: {reason}")]
    DirectoryCreateFailed {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying failure description
        reason: String,
    },

    /// The destination already exists and the collision policy refused it
    #[error("file collision at {path}: {reason}")]
    FileCollision {
        /// The colliding destination path
        path: PathBuf,
        /// Why the collision could not be resolved
        reason: String,
    },

    /// The path could not be decomposed (no stem, no parent)
    #[error("invalid path {path}: {reason}")]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why the path is unusable
        reason: String,
    },

    /// The tool reported success but the expected output file is missing
    #[error("expected output file missing: {path}")]
    OutputMissing {
        /// The destination that should have been written
        path: PathBuf,
    },
}
