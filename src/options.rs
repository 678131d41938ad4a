//! Mapping from configuration to yt-dlp invocation arguments
//!
//! The library never negotiates formats itself; everything the tool needs is
//! compiled here into a format selector and a flat argument vector.

use crate::config::{AudioQuality, Config, FileCollisionAction};
use std::path::Path;
use tracing::debug;

/// Resolve the yt-dlp format selector for the configured stream policy
///
/// The quality tier picks a base selector; a preferred codec and/or bitrate
/// cap narrow it with a leading `bestaudio[...]` alternative, keeping the base
/// as fallback.
///
/// # Examples
///
/// ```
/// use audio_dl::options::format_selector;
/// use audio_dl::Config;
///
/// // defaults: best quality, opus preferred
/// assert_eq!(format_selector(&Config::default()), "bestaudio[ext=opus]/bestaudio/best");
/// ```
#[must_use]
pub fn format_selector(config: &Config) -> String {
    let base = match config.stream.audio_quality {
        AudioQuality::Best => "bestaudio/best",
        AudioQuality::Balanced => "bestaudio[abr<=128]/bestaudio",
        AudioQuality::Worst => "worstaudio/worst",
    };

    let mut filters = String::new();
    if let Some(codec) = config.stream.preferred_codec {
        filters.push_str(&format!("[ext={}]", codec.as_str()));
    }
    if let Some(cap) = config.stream.max_bitrate_kbps {
        filters.push_str(&format!("[abr<={cap}]"));
    }

    if filters.is_empty() {
        base.to_string()
    } else {
        format!("bestaudio{filters}/{base}")
    }
}

/// Build the argument vector for a metadata probe (no download)
#[must_use]
pub fn probe_args(url: &str) -> Vec<String> {
    vec![
        "--dump-json".to_string(),
        "--skip-download".to_string(),
        "--no-playlist".to_string(),
        "--no-warnings".to_string(),
        url.to_string(),
    ]
}

/// Build the argument vector for fetching a track to `destination`
///
/// Retry and timeout knobs are forwarded verbatim; the overwrite flag follows
/// the collision policy (the resolver has already settled Skip/Rename, so
/// only Overwrite needs the tool's cooperation).
#[must_use]
pub fn fetch_args(config: &Config, url: &str, destination: &Path) -> Vec<String> {
    let overwrite_flag = match config.save.file_collision {
        FileCollisionAction::Overwrite => "--force-overwrites",
        _ => "--no-overwrites",
    };

    let args = vec![
        "-f".to_string(),
        format_selector(config),
        "-o".to_string(),
        destination.to_string_lossy().to_string(),
        "--no-playlist".to_string(),
        "--quiet".to_string(),
        "--no-warnings".to_string(),
        "--retries".to_string(),
        config.network.retries.to_string(),
        "--socket-timeout".to_string(),
        config.network.socket_timeout.as_secs().to_string(),
        overwrite_flag.to_string(),
        url.to_string(),
    ];

    debug!(?args, "built yt-dlp arguments");
    args
}
