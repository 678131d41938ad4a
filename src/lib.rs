//! # audio-dl
//!
//! Configuration-driven audio download library wrapping the external
//! [yt-dlp](https://github.com/yt-dlp/yt-dlp) CLI.
//!
//! ## Design Philosophy
//!
//! audio-dl is designed to be:
//! - **A thin façade** - site extraction, format negotiation, and network
//!   handling stay entirely in yt-dlp
//! - **Sensible defaults** - works out of the box with zero configuration
//! - **Library-first** - no CLI or UI, purely a Rust crate for embedding
//! - **Record-oriented** - every attempt yields a validated
//!   [`DownloadResult`], optionally persisted as a JSON sidecar
//!
//! ## Quick Start
//!
//! ```no_run
//! use audio_dl::{AudioDownloader, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let downloader = AudioDownloader::new(Config::default())?;
//!
//!     let result = downloader
//!         .download("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
//!         .await;
//!
//!     if result.success {
//!         println!("saved: {:?} ({:?} bytes)", result.file_path, result.file_size_bytes);
//!     } else {
//!         eprintln!("failed: {}", result.error_message.unwrap_or_default());
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Core downloader orchestration
pub mod downloader;
/// Error types
pub mod error;
/// Mapping from configuration to tool invocation arguments
pub mod options;
/// Destination path resolution and filename sanitization
pub mod paths;
/// External media tool boundary
pub mod tool;
/// Core types and result records
pub mod types;

// Re-export commonly used types
pub use config::{AudioCodec, AudioQuality, Config, FileCollisionAction, FilenameScheme};
pub use downloader::AudioDownloader;
pub use error::{Error, FilesystemError, MetadataError, Result};
pub use tool::{CliYtDlp, MediaTool};
pub use types::{DownloadResult, TrackMetadata};
