//! End-to-end orchestration tests using a stub media tool
//!
//! These exercise the full probe → resolve → fetch → record pipeline without
//! a network or a yt-dlp binary.

mod common;

use audio_dl::config::{FileCollisionAction, FilenameScheme};
use audio_dl::{AudioDownloader, DownloadResult};
use common::{StubTool, sample_metadata, test_config};
use std::sync::Arc;
use tempfile::TempDir;

fn downloader_with(stub: StubTool, dir: &TempDir) -> AudioDownloader {
    AudioDownloader::with_tool(test_config(dir.path()), Arc::new(stub))
        .expect("downloader construction failed")
}

const URL: &str = "https://example.com/watch?v=abc123";

#[tokio::test]
async fn successful_download_produces_file_and_record() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::new(sample_metadata()), &dir);

    let result = downloader.download(URL).await;

    assert!(result.success, "unexpected failure: {:?}", result.error_message);
    assert_eq!(result.track_id, "abc123");
    assert_eq!(result.title, "Stub Track");
    assert_eq!(result.duration_seconds, Some(124));
    assert_eq!(result.uploader.as_deref(), Some("Stub Channel"));
    assert_eq!(result.upload_date.as_deref(), Some("20240105"));
    result.validate().unwrap();

    // default layout: one subdirectory per track, opus extension
    let expected = dir.path().join("Stub Track").join("Stub Track.opus");
    assert_eq!(result.file_path.as_deref(), Some(expected.as_path()));
    assert!(expected.is_file());
    assert_eq!(
        result.file_size_bytes,
        Some(std::fs::metadata(&expected).unwrap().len())
    );
}

#[tokio::test]
async fn no_sidecar_is_written_by_default() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::new(sample_metadata()), &dir);

    let result = downloader.download(URL).await;
    assert!(result.success);

    let sidecar = dir.path().join("Stub Track").join("Stub Track.json");
    assert!(!sidecar.exists());
}

#[tokio::test]
async fn sidecar_is_written_when_enabled() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.save.write_result_file = true;

    let downloader =
        AudioDownloader::with_tool(config, Arc::new(StubTool::new(sample_metadata()))).unwrap();
    let result = downloader.download(URL).await;
    assert!(result.success);

    let sidecar = dir.path().join("Stub Track").join("Stub Track.json");
    let text = std::fs::read_to_string(&sidecar).unwrap();
    let record: DownloadResult = serde_json::from_str(&text).unwrap();
    assert!(record.success);
    assert_eq!(record.track_id, "abc123");
    assert_eq!(record.file_path, result.file_path);
}

#[tokio::test]
async fn flat_layout_with_track_id_naming() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.save.create_subdirectories = false;
    config.save.filename = FilenameScheme::TrackId;

    let downloader =
        AudioDownloader::with_tool(config, Arc::new(StubTool::new(sample_metadata()))).unwrap();
    let result = downloader.download(URL).await;

    assert!(result.success);
    assert_eq!(
        result.file_path.as_deref(),
        Some(dir.path().join("abc123.opus").as_path())
    );
}

#[tokio::test]
async fn skip_collision_yields_failed_record() {
    let dir = TempDir::new().unwrap();
    let track_dir = dir.path().join("Stub Track");
    std::fs::create_dir_all(&track_dir).unwrap();
    std::fs::write(track_dir.join("Stub Track.opus"), b"existing").unwrap();

    let downloader = downloader_with(StubTool::new(sample_metadata()), &dir);
    let result = downloader.download(URL).await;

    assert!(!result.success);
    // identity comes from the probe, not "unknown"
    assert_eq!(result.track_id, "abc123");
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("collision")
    );
    // the existing file is untouched
    assert_eq!(
        std::fs::read(track_dir.join("Stub Track.opus")).unwrap(),
        b"existing"
    );
}

#[tokio::test]
async fn rename_collision_appends_suffix() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(dir.path());
    config.save.file_collision = FileCollisionAction::Rename;
    config.save.create_subdirectories = false;
    std::fs::write(dir.path().join("Stub Track.opus"), b"existing").unwrap();

    let downloader =
        AudioDownloader::with_tool(config, Arc::new(StubTool::new(sample_metadata()))).unwrap();
    let result = downloader.download(URL).await;

    assert!(result.success);
    assert_eq!(
        result.file_path.as_deref(),
        Some(dir.path().join("Stub Track (1).opus").as_path())
    );
    assert!(dir.path().join("Stub Track (1).opus").is_file());
}

#[tokio::test]
async fn fetch_failure_keeps_probed_identity() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(
        StubTool::failing_fetch(sample_metadata(), "HTTP Error 403: Forbidden"),
        &dir,
    );

    let result = downloader.download(URL).await;

    assert!(!result.success);
    assert_eq!(result.track_id, "abc123");
    assert_eq!(result.title, "Stub Track");
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("403")
    );
    result.validate().unwrap();
}

#[tokio::test]
async fn probe_failure_yields_unknown_identity() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::failing_probe("Unsupported URL"), &dir);

    let result = downloader.download(URL).await;

    assert!(!result.success);
    assert_eq!(result.track_id, "unknown");
    assert_eq!(result.title, "unknown");
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("Unsupported URL")
    );
}

#[tokio::test]
async fn invalid_url_yields_failed_record_without_probe() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::new(sample_metadata()), &dir);

    let result = downloader.download("ftp://example.com/file").await;

    assert!(!result.success);
    assert_eq!(result.track_id, "unknown");
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("invalid URL")
    );
}

#[tokio::test]
async fn missing_output_file_yields_failed_record() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::skipping_write(sample_metadata()), &dir);

    let result = downloader.download(URL).await;

    assert!(!result.success);
    assert_eq!(result.track_id, "abc123");
    assert!(
        result
            .error_message
            .as_deref()
            .unwrap_or_default()
            .contains("missing")
    );
}

#[tokio::test]
async fn probe_api_exposes_metadata_directly() {
    let dir = TempDir::new().unwrap();
    let downloader = downloader_with(StubTool::new(sample_metadata()), &dir);

    let metadata = downloader.probe(URL).await.unwrap();
    assert_eq!(metadata.id, "abc123");
    assert_eq!(metadata.duration_seconds(), Some(124));
}
