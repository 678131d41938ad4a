//! Parser for yt-dlp probe output

use crate::error::{MetadataError, Result};
use crate::types::TrackMetadata;
use std::str;

/// Exit status of an external command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// The command exited successfully (exit code 0)
    Success,
    /// The command exited with a non-zero exit code
    Failure,
}

impl ExitStatus {
    /// Returns `true` if the exit status represents success
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<bool> for ExitStatus {
    fn from(success: bool) -> Self {
        if success { Self::Success } else { Self::Failure }
    }
}

/// Parse output from a `--dump-json` probe invocation
///
/// Decodes the single-line info JSON emitted by yt-dlp into [`TrackMetadata`].
/// On failure the last non-empty stderr line is used as the reason, since
/// yt-dlp prints its actual error there after any progress noise.
///
/// # Arguments
///
/// * `url` - The media URL that was probed (for error context)
/// * `stdout` - Standard output from the probe command
/// * `stderr` - Standard error from the probe command
/// * `exit_status` - Whether the command exited successfully
///
/// # Errors
///
/// Returns [`MetadataError::ExtractionFailed`] on non-zero exit,
/// [`MetadataError::EmptyOutput`] when nothing was emitted, and
/// [`MetadataError::MalformedJson`] when the output cannot be decoded.
pub fn parse_probe_output(
    url: &str,
    stdout: &[u8],
    stderr: &[u8],
    exit_status: ExitStatus,
) -> Result<TrackMetadata> {
    if !exit_status.is_success() {
        let reason = last_nonempty_line(str::from_utf8(stderr).unwrap_or_default())
            .unwrap_or_else(|| "tool exited with an error".to_string());
        return Err(MetadataError::ExtractionFailed {
            url: url.to_string(),
            reason,
        }
        .into());
    }

    let text = str::from_utf8(stdout).unwrap_or_default().trim();
    if text.is_empty() {
        return Err(MetadataError::EmptyOutput.into());
    }

    // --dump-json emits one JSON object per line; with --no-playlist there is
    // exactly one entry, so only the first line matters
    let line = text.lines().next().unwrap_or(text);
    let metadata: TrackMetadata = serde_json::from_str(line)
        .map_err(|e| MetadataError::MalformedJson(e.to_string()))?;

    Ok(metadata)
}

fn last_nonempty_line(text: &str) -> Option<String> {
    text.lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(ToString::to_string)
}
