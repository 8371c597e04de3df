//! Loose artwork discovery
//!
//! Looks for an image file such as `cover.jpg` or `Folder.PNG` next to the
//! track. The first directory entry matching the artwork pattern wins.

use std::fs;
use std::path::Path;

use image::ImageReader;
use regex::{Regex, RegexBuilder};

use super::error::Result;
use super::{Artwork, ArtworkOrigin};

/// Common cover art file names with common image extensions
pub const DEFAULT_ARTWORK_PATTERN: &str =
    r"^(cover|folder|front|albumart|album|artwork|art)\.(jpe?g|png|gif|webp|bmp)$";

/// Scans a single directory for an artwork image
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    pattern: Regex,
}

impl DirectoryScanner {
    /// Compile `pattern` case-insensitively
    pub fn new(pattern: &str) -> std::result::Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    /// Whether a directory entry name is an artwork candidate
    pub fn matches(&self, file_name: &str) -> bool {
        !file_name.starts_with('.') && self.pattern.is_match(file_name)
    }

    /// Decode the first matching image in `dir`, if any
    ///
    /// Failures are logged and reported as no artwork.
    pub fn scan(&self, dir: &Path) -> Option<Artwork> {
        match self.try_scan(dir) {
            Ok(artwork) => artwork,
            Err(e) => {
                tracing::warn!("Artwork scan of {:?} failed: {}", dir, e);
                None
            }
        }
    }

    fn try_scan(&self, dir: &Path) -> Result<Option<Artwork>> {
        let entries = fs::read_dir(dir)?;

        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            if !self.matches(name) {
                continue;
            }

            tracing::debug!("Found image file: {}", name);

            // First match only: a broken candidate ends the scan
            let path = entry.path();
            let image = ImageReader::open(&path)?.with_guessed_format()?.decode()?;
            return Ok(Some(Artwork::new(image, ArtworkOrigin::Directory(path))));
        }

        tracing::debug!("No artwork file in {:?}", dir);
        Ok(None)
    }
}

impl Default for DirectoryScanner {
    fn default() -> Self {
        Self {
            pattern: RegexBuilder::new(DEFAULT_ARTWORK_PATTERN)
                .case_insensitive(true)
                .build()
                .expect("default artwork pattern is valid"),
        }
    }
}
