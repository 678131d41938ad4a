//! External media tool boundary
//!
//! This module provides a trait-based architecture for talking to the external
//! extraction/download tool. All heavy lifting (site scraping, format
//! negotiation, network handling) happens inside the tool; this boundary only
//! spawns it and interprets its output.
//!
//! ## Architecture
//!
//! The core abstraction is the [`MediaTool`] trait, which defines the two
//! operations the library needs: a metadata probe and a fetch. One
//! implementation is provided:
//!
//! - [`CliYtDlp`]: shells out to the `yt-dlp` binary
//!
//! Tests substitute their own [`MediaTool`] implementations to exercise the
//! orchestration without a network or binary.
//!
//! ## Usage
//!
//! ```no_run
//! use audio_dl::tool::{CliYtDlp, MediaTool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Try to find yt-dlp in PATH
//!     let tool = CliYtDlp::from_path().expect("yt-dlp binary not found");
//!
//!     let metadata = tool.probe("https://www.youtube.com/watch?v=example").await?;
//!     println!("{} ({})", metadata.title, metadata.id);
//!
//!     Ok(())
//! }
//! ```

mod cli;
mod parser;
mod traits;

pub use cli::CliYtDlp;
pub use parser::{ExitStatus, parse_probe_output};
pub use traits::MediaTool;
