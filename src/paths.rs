//! Destination path resolution and filename sanitization

use crate::config::{FileCollisionAction, FilenameScheme, SaveConfig};
use crate::error::{Error, FilesystemError, Result};
use crate::types::TrackMetadata;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Maximum number of rename attempts when resolving file collisions
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Characters that are unsafe in file names on at least one platform
const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Remove characters that are invalid in file names
///
/// Invalid and control characters are replaced with `_`; runs of whitespace
/// collapse to a single space and the result is trimmed.
///
/// # Examples
///
/// ```
/// use audio_dl::paths::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("AC/DC: Back In Black"), "AC_DC_ Back In Black");
/// assert_eq!(sanitize_file_name("  spaced \t out  "), "spaced out");
/// ```
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| {
            if INVALID_FILENAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Get a unique path for a file, handling collisions according to the specified action
///
/// # Arguments
///
/// * `path` - The desired file path
/// * `action` - How to handle file collisions
///
/// # Returns
///
/// Returns the final path to use. For Rename action, this may have a suffix added.
/// For Skip action, returns an error if the file already exists.
/// For Overwrite action, returns the original path unchanged.
///
/// # Examples
///
/// ```
/// use audio_dl::paths::get_unique_path;
/// use audio_dl::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/tmp/track.opus");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// // If /tmp/track.opus exists, returns /tmp/track (1).opus
/// // If that exists too, returns /tmp/track (2).opus, etc.
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => {
            // Always use the original path, overwriting if it exists
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Skip => {
            // Return error if file exists
            if path.exists() {
                return Err(Error::Filesystem(FilesystemError::FileCollision {
                    path: path.to_path_buf(),
                    reason: "file already exists and collision action is skip".to_string(),
                }));
            }
            Ok(path.to_path_buf())
        }
        FileCollisionAction::Rename => {
            // If file doesn't exist, use original path
            if !path.exists() {
                return Ok(path.to_path_buf());
            }

            // File exists, need to find a unique name
            let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
                Error::Filesystem(FilesystemError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "cannot extract file stem".to_string(),
                })
            })?;

            let extension = path.extension().and_then(|e| e.to_str());

            let parent = path.parent().ok_or_else(|| {
                Error::Filesystem(FilesystemError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "cannot extract parent directory".to_string(),
                })
            })?;

            // Try adding (1), (2), (3), ... until we find a unique name
            for i in 1..=MAX_RENAME_ATTEMPTS {
                let new_name = match extension {
                    Some(ext) => format!("{} ({}).{}", stem, i, ext),
                    None => format!("{} ({})", stem, i),
                };
                let new_path = parent.join(new_name);
                if !new_path.exists() {
                    return Ok(new_path);
                }
            }

            Err(Error::Filesystem(FilesystemError::FileCollision {
                path: path.to_path_buf(),
                reason: format!("could not find unique filename after {MAX_RENAME_ATTEMPTS} attempts"),
            }))
        }
    }
}

/// Resolves destination paths according to the configured save policy
///
/// Owns the directory-layout rules: sanitized base names, optional per-track
/// subdirectories, and collision handling. One resolver is held per
/// [`AudioDownloader`](crate::AudioDownloader).
#[derive(Clone, Debug)]
pub struct PathResolver {
    save: SaveConfig,
}

impl PathResolver {
    /// Create a resolver for the given save policy
    pub fn new(save: SaveConfig) -> Self {
        Self { save }
    }

    /// Ensure the base output directory exists
    ///
    /// # Errors
    ///
    /// Returns [`FilesystemError::DirectoryCreateFailed`] if the directory
    /// cannot be created.
    pub fn ensure_base_directory(&self) -> Result<()> {
        std::fs::create_dir_all(&self.save.output_dir).map_err(|e| {
            Error::Filesystem(FilesystemError::DirectoryCreateFailed {
                path: self.save.output_dir.clone(),
                reason: e.to_string(),
            })
        })?;
        debug!(path = ?self.save.output_dir, "base directory ensured");
        Ok(())
    }

    /// Compute the base file stem for a track per the naming scheme
    ///
    /// An empty sanitized title falls back to the track id, and an empty id
    /// falls back to `"unknown"`, so the stem is never empty.
    #[must_use]
    pub fn base_name(&self, metadata: &TrackMetadata) -> String {
        let base = match self.save.filename {
            FilenameScheme::Title => sanitize_file_name(&metadata.title),
            FilenameScheme::TrackId => sanitize_file_name(&metadata.id),
        };
        if !base.is_empty() {
            return base;
        }
        let fallback = sanitize_file_name(&metadata.id);
        if fallback.is_empty() {
            "unknown".to_string()
        } else {
            fallback
        }
    }

    /// Resolve the full destination path for a track
    ///
    /// Creates the target directory (including the per-track subdirectory when
    /// configured) and applies the collision policy to the final file name.
    ///
    /// # Errors
    ///
    /// Returns a filesystem error if the target directory cannot be created or
    /// if the collision policy refuses the destination.
    pub fn resolve_destination(
        &self,
        metadata: &TrackMetadata,
        extension: &str,
    ) -> Result<PathBuf> {
        let base = self.base_name(metadata);
        let file_name = format!("{base}.{extension}");

        let target_dir = if self.save.create_subdirectories {
            self.save.output_dir.join(&base)
        } else {
            self.save.output_dir.clone()
        };

        std::fs::create_dir_all(&target_dir).map_err(|e| {
            Error::Filesystem(FilesystemError::DirectoryCreateFailed {
                path: target_dir.clone(),
                reason: e.to_string(),
            })
        })?;

        let destination = get_unique_path(&target_dir.join(file_name), self.save.file_collision)?;
        debug!(?destination, "destination resolved");
        Ok(destination)
    }
}
