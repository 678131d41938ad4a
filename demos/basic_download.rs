//! Basic download example
//!
//! This example demonstrates the core functionality of audio-dl:
//! - Creating a downloader with the default configuration
//! - Downloading the audio stream of a single URL
//! - Inspecting the result record

use audio_dl::{AudioDownloader, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Default configuration: best-quality opus into ./downloads, one
    // subdirectory per track, no overwriting
    let downloader = AudioDownloader::new(Config::default())?;

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string());

    let result = downloader.download(&url).await;

    if result.success {
        println!("✓ {} ({})", result.title, result.track_id);
        println!("  file: {:?}", result.file_path);
        println!("  size: {:?} bytes", result.file_size_bytes);
        println!("  duration: {:?} s", result.duration_seconds);
    } else {
        println!(
            "✗ {}: {}",
            result.title,
            result.error_message.unwrap_or_default()
        );
    }

    Ok(())
}
