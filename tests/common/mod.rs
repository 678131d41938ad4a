//! Common test utilities for audio-dl integration tests

use async_trait::async_trait;
use audio_dl::config::{Config, SaveConfig};
use audio_dl::error::{Error, Result};
use audio_dl::tool::MediaTool;
use audio_dl::types::TrackMetadata;
use std::path::{Path, PathBuf};

/// Metadata the stub tool "resolves" for every probe
pub fn sample_metadata() -> TrackMetadata {
    TrackMetadata {
        id: "abc123".to_string(),
        title: "Stub Track".to_string(),
        uploader: Some("Stub Channel".to_string()),
        duration: Some(123.6),
        upload_date: Some("20240105".to_string()),
        webpage_url: Some("https://example.com/watch?v=abc123".to_string()),
        extractor: Some("example".to_string()),
    }
}

/// Config pointed at a temp output directory, otherwise defaults
pub fn test_config(output_dir: &Path) -> Config {
    Config {
        save: SaveConfig {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Extract the `-o` destination from a fetch argument vector
pub fn destination_from_args(args: &[String]) -> PathBuf {
    let index = args
        .iter()
        .position(|a| a == "-o")
        .expect("fetch args must contain -o");
    PathBuf::from(&args[index + 1])
}

/// A [`MediaTool`] stand-in that never spawns anything
///
/// Probes return canned metadata and fetches write a canned payload to the
/// `-o` destination, so the full orchestration can run without a network or
/// binary. Failure modes are switchable per test.
pub struct StubTool {
    metadata: TrackMetadata,
    payload: Vec<u8>,
    probe_error: Option<String>,
    fetch_error: Option<String>,
    skip_write: bool,
}

impl StubTool {
    pub fn new(metadata: TrackMetadata) -> Self {
        Self {
            metadata,
            payload: b"stub audio payload".to_vec(),
            probe_error: None,
            fetch_error: None,
            skip_write: false,
        }
    }

    /// Stub whose probe fails with the given message
    pub fn failing_probe(message: &str) -> Self {
        let mut stub = Self::new(sample_metadata());
        stub.probe_error = Some(message.to_string());
        stub
    }

    /// Stub whose fetch fails with the given message
    pub fn failing_fetch(metadata: TrackMetadata, message: &str) -> Self {
        let mut stub = Self::new(metadata);
        stub.fetch_error = Some(message.to_string());
        stub
    }

    /// Stub whose fetch "succeeds" without writing the output file
    pub fn skipping_write(metadata: TrackMetadata) -> Self {
        let mut stub = Self::new(metadata);
        stub.skip_write = true;
        stub
    }
}

#[async_trait]
impl MediaTool for StubTool {
    async fn probe(&self, _url: &str) -> Result<TrackMetadata> {
        match &self.probe_error {
            Some(message) => Err(Error::ExternalTool(message.clone())),
            None => Ok(self.metadata.clone()),
        }
    }

    async fn fetch(&self, args: &[String]) -> Result<()> {
        if let Some(message) = &self.fetch_error {
            return Err(Error::ExternalTool(message.clone()));
        }
        if !self.skip_write {
            let destination = destination_from_args(args);
            std::fs::write(destination, &self.payload)?;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
