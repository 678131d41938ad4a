//! Configuration types for audio-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Save policy configuration (output directory, naming, collision handling)
///
/// Groups settings related to where downloaded audio lands and how files are
/// named. Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveConfig {
    /// Output directory for downloaded audio (default: "./downloads")
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File naming scheme (default: track title)
    #[serde(default)]
    pub filename: FilenameScheme,

    /// File collision handling (default: skip, refusing to overwrite)
    #[serde(default)]
    pub file_collision: FileCollisionAction,

    /// Create a per-track subdirectory named after the file stem (default: true)
    #[serde(default = "default_true")]
    pub create_subdirectories: bool,

    /// Write a JSON result sidecar next to the audio file (default: false)
    #[serde(default)]
    pub write_result_file: bool,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            filename: FilenameScheme::default(),
            file_collision: FileCollisionAction::default(),
            create_subdirectories: true,
            write_result_file: false,
        }
    }
}

/// Stream selection configuration (quality tier, codec, bitrate cap)
///
/// These settings are compiled into the tool's format selector; no format
/// negotiation happens in this library. Used as a nested sub-config within
/// [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Audio quality tier (default: best)
    #[serde(default)]
    pub audio_quality: AudioQuality,

    /// Preferred audio codec, or `None` to accept whatever the site serves
    /// (default: opus)
    #[serde(default = "default_codec")]
    pub preferred_codec: Option<AudioCodec>,

    /// Maximum average bitrate in kbit/s (None = uncapped)
    #[serde(default)]
    pub max_bitrate_kbps: Option<u32>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            audio_quality: AudioQuality::default(),
            preferred_codec: default_codec(),
            max_bitrate_kbps: None,
        }
    }
}

/// Robustness knobs forwarded verbatim to the external tool
///
/// The library performs no retries or timeout handling of its own; these
/// values map directly onto `--retries` and `--socket-timeout`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Number of download attempts the tool should make (default: 3)
    #[serde(default = "default_retries")]
    pub retries: u32,

    /// Socket timeout per attempt (default: 30 seconds)
    #[serde(default = "default_socket_timeout", with = "duration_serde")]
    pub socket_timeout: Duration,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            socket_timeout: default_socket_timeout(),
        }
    }
}

/// External tool discovery configuration
///
/// Groups settings for locating the yt-dlp binary. Used as a nested
/// sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    pub ytdlp_path: Option<PathBuf>,

    /// Whether to search PATH for the binary if no explicit path is set
    /// (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            search_path: true,
        }
    }
}

/// Main configuration for [`AudioDownloader`](crate::AudioDownloader)
///
/// Fields are organized into logical sub-configs for maintainability:
/// - [`save`](SaveConfig) — output directory, naming, collision handling
/// - [`stream`](StreamConfig) — quality, codec, bitrate cap
/// - [`network`](NetworkConfig) — knobs forwarded to the tool
/// - [`tools`](ToolsConfig) — binary discovery
///
/// All sub-config fields are flattened for serialization, so the JSON/TOML
/// format stays flat (no nesting). A default-constructed `Config` is valid
/// and downloads best-quality opus into `./downloads`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Save policy (directories, naming, collisions)
    #[serde(flatten)]
    pub save: SaveConfig,

    /// Stream selection (quality, codec, bitrate)
    #[serde(flatten)]
    pub stream: StreamConfig,

    /// Robustness knobs forwarded to the tool
    #[serde(flatten)]
    pub network: NetworkConfig,

    /// External tool discovery
    #[serde(flatten)]
    pub tools: ToolsConfig,
}

// Convenience accessors — allow call sites to use `config.output_dir()` etc.
// without reaching through the sub-config structs.
impl Config {
    /// Output directory for downloaded audio
    pub fn output_dir(&self) -> &PathBuf {
        &self.save.output_dir
    }

    /// Container extension for the configured codec (`webm` when no codec
    /// preference is set)
    pub fn audio_extension(&self) -> &'static str {
        self.stream
            .preferred_codec
            .map_or("webm", AudioCodec::as_str)
    }

    /// Validate the configuration, returning a keyed error for the first
    /// invalid setting found
    pub fn validate(&self) -> Result<()> {
        if self.save.output_dir.as_os_str().is_empty() {
            return Err(Error::config("output directory must not be empty", "output_dir"));
        }
        if self.network.socket_timeout.is_zero() {
            return Err(Error::config("socket timeout must be at least 1 second", "socket_timeout"));
        }
        if self.stream.max_bitrate_kbps == Some(0) {
            return Err(Error::config("bitrate cap must be greater than zero", "max_bitrate_kbps"));
        }
        Ok(())
    }
}

/// File naming scheme for downloaded audio
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameScheme {
    /// Name files after the sanitized track title (default)
    #[default]
    Title,
    /// Name files after the site-assigned track id
    TrackId,
}

/// Audio stream quality tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioQuality {
    /// Best available audio stream (default)
    #[default]
    Best,
    /// Capped at roughly 128 kbit/s, falling back to best
    Balanced,
    /// Smallest available audio stream
    Worst,
}

/// Preferred audio codec
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCodec {
    /// Opus (typically in a webm/ogg container)
    Opus,
    /// AAC / m4a
    Aac,
    /// MP3
    Mp3,
}

impl AudioCodec {
    /// The codec name as used both in format selectors and as the file
    /// extension
    pub fn as_str(self) -> &'static str {
        match self {
            AudioCodec::Opus => "opus",
            AudioCodec::Aac => "aac",
            AudioCodec::Mp3 => "mp3",
        }
    }
}

/// File collision handling strategy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCollisionAction {
    /// Append (1), (2), etc. to the filename
    Rename,
    /// Overwrite the existing file
    Overwrite,
    /// Refuse the download, keep the existing file (default)
    #[default]
    Skip,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_true() -> bool {
    true
}

fn default_codec() -> Option<AudioCodec> {
    Some(AudioCodec::Opus)
}

fn default_retries() -> u32 {
    3
}

fn default_socket_timeout() -> Duration {
    Duration::from_secs(30)
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.output_dir(), &PathBuf::from("downloads"));
        assert_eq!(config.save.filename, FilenameScheme::Title);
        assert_eq!(config.save.file_collision, FileCollisionAction::Skip);
        assert!(config.save.create_subdirectories);
        assert!(!config.save.write_result_file);
        assert_eq!(config.stream.preferred_codec, Some(AudioCodec::Opus));
        assert_eq!(config.network.retries, 3);
        assert_eq!(config.network.socket_timeout, Duration::from_secs(30));
    }

    #[test]
    fn empty_json_deserializes_to_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.save.output_dir, PathBuf::from("downloads"));
        assert_eq!(config.stream.audio_quality, AudioQuality::Best);
        assert!(config.tools.search_path);
    }

    #[test]
    fn flattened_fields_deserialize_by_name() {
        let json = r#"{
            "output_dir": "music",
            "filename": "track_id",
            "file_collision": "rename",
            "audio_quality": "balanced",
            "preferred_codec": "mp3",
            "max_bitrate_kbps": 160,
            "retries": 7,
            "socket_timeout": 10
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.save.output_dir, PathBuf::from("music"));
        assert_eq!(config.save.filename, FilenameScheme::TrackId);
        assert_eq!(config.save.file_collision, FileCollisionAction::Rename);
        assert_eq!(config.stream.audio_quality, AudioQuality::Balanced);
        assert_eq!(config.stream.preferred_codec, Some(AudioCodec::Mp3));
        assert_eq!(config.stream.max_bitrate_kbps, Some(160));
        assert_eq!(config.network.retries, 7);
        assert_eq!(config.network.socket_timeout, Duration::from_secs(10));
    }

    #[test]
    fn null_codec_deserializes_to_none() {
        let config: Config = serde_json::from_str(r#"{"preferred_codec": null}"#).unwrap();
        assert_eq!(config.stream.preferred_codec, None);
        assert_eq!(config.audio_extension(), "webm");
    }

    #[test]
    fn validate_rejects_empty_output_dir() {
        let config = Config {
            save: SaveConfig {
                output_dir: PathBuf::new(),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("output_dir")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            network: NetworkConfig {
                socket_timeout: Duration::ZERO,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("socket_timeout")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_zero_bitrate_cap() {
        let config = Config {
            stream: StreamConfig {
                max_bitrate_kbps: Some(0),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = Config {
            save: SaveConfig {
                output_dir: PathBuf::from("library"),
                filename: FilenameScheme::TrackId,
                file_collision: FileCollisionAction::Overwrite,
                create_subdirectories: false,
                write_result_file: true,
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.save.output_dir, PathBuf::from("library"));
        assert_eq!(back.save.file_collision, FileCollisionAction::Overwrite);
        assert!(!back.save.create_subdirectories);
        assert!(back.save.write_result_file);
    }
}
