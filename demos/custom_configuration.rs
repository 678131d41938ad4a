//! Custom configuration example
//!
//! This example shows how to configure audio-dl with various options:
//! - Custom output directory and flat layout
//! - Track-id file naming and rename-on-collision
//! - Stream selection (quality tier, codec, bitrate cap)
//! - Network knobs forwarded to yt-dlp
//! - JSON result sidecars
//! - An explicit yt-dlp binary path

use std::path::PathBuf;
use std::time::Duration;

use audio_dl::config::{
    AudioCodec, AudioQuality, Config, FileCollisionAction, FilenameScheme, NetworkConfig,
    SaveConfig, StreamConfig, ToolsConfig,
};
use audio_dl::AudioDownloader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    let config = Config {
        save: SaveConfig {
            output_dir: PathBuf::from("music"),
            // Name files after the site-assigned id instead of the title
            filename: FilenameScheme::TrackId,
            // Append (1), (2), ... instead of refusing existing files
            file_collision: FileCollisionAction::Rename,
            // Flat layout: everything directly under music/
            create_subdirectories: false,
            // Keep a JSON record next to every downloaded file
            write_result_file: true,
        },
        stream: StreamConfig {
            audio_quality: AudioQuality::Balanced,
            preferred_codec: Some(AudioCodec::Mp3),
            max_bitrate_kbps: Some(160),
        },
        network: NetworkConfig {
            // Forwarded verbatim to yt-dlp; no retrying happens in audio-dl
            retries: 5,
            socket_timeout: Duration::from_secs(15),
        },
        tools: ToolsConfig {
            // Pin a specific binary; PATH search only kicks in as fallback
            ytdlp_path: Some(PathBuf::from("/usr/local/bin/yt-dlp")),
            search_path: true,
        },
    };

    let downloader = AudioDownloader::new(config)?;

    // Probe first to see what the URL resolves to
    let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";
    let metadata = downloader.probe(url).await?;
    println!(
        "resolved: {} by {} ({:?} s)",
        metadata.title,
        metadata.uploader.as_deref().unwrap_or("unknown"),
        metadata.duration
    );

    // Then download; failures land in the record, not in an Err
    let result = downloader.download(url).await;
    println!("success: {}, path: {:?}", result.success, result.file_path);

    Ok(())
}
