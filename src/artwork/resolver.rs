//! Artwork resolution
//!
//! Priority:
//! 1. Embedded in the media file
//! 2. Artwork file in the track's directory

use std::path::Path;

use super::Artwork;
use super::directory::DirectoryScanner;
use super::embedded::extract_embedded;
use super::error::ArtworkError;
use super::sniffer::MediaTypeSniffer;

/// Something that can produce artwork for a track
///
/// Implementations must never fail outward: every failure is reported as
/// no artwork.
pub trait ResolveArtwork {
    fn resolve(&self, root: &Path, uri: &str) -> Option<Artwork>;
}

/// Resolves artwork from embedded pictures, then from the track's directory
#[derive(Debug, Default)]
pub struct ArtworkResolver {
    sniffer: MediaTypeSniffer,
    scanner: DirectoryScanner,
}

impl ArtworkResolver {
    pub fn new(sniffer: MediaTypeSniffer, scanner: DirectoryScanner) -> Self {
        Self { sniffer, scanner }
    }

    pub fn sniffer(&self) -> &MediaTypeSniffer {
        &self.sniffer
    }

    /// Used to tear the media type database down at shutdown
    pub fn sniffer_mut(&mut self) -> &mut MediaTypeSniffer {
        &mut self.sniffer
    }

    pub fn scanner(&self) -> &DirectoryScanner {
        &self.scanner
    }
}

impl ResolveArtwork for ArtworkResolver {
    fn resolve(&self, root: &Path, uri: &str) -> Option<Artwork> {
        let path = root.join(uri);

        match extract_embedded(&self.sniffer, &path) {
            Ok(artwork) => return Some(artwork),
            Err(ArtworkError::NotApplicable(reason)) => {
                tracing::debug!("No embedded artwork lookup for {:?}: {}", path, reason);
            }
            Err(e) => {
                tracing::debug!("Embedded artwork unavailable for {:?}: {}", path, e);
            }
        }

        match path.parent() {
            Some(dir) => self.scanner.scan(dir),
            None => {
                tracing::warn!("No parent directory for {:?}", path);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artwork::fixtures::{write_image, write_mp3_with_artwork, write_mp3_without_artwork};
    use crate::artwork::{ArtworkOrigin, DEFAULT_EMBEDDED_MEDIA_TYPES};
    use image::ImageFormat;
    use tempfile::TempDir;

    fn resolver() -> ArtworkResolver {
        let mut sniffer = MediaTypeSniffer::new();
        sniffer.init(DEFAULT_EMBEDDED_MEDIA_TYPES).unwrap();
        ArtworkResolver::new(sniffer, DirectoryScanner::default())
    }

    #[test]
    fn test_embedded_takes_precedence() {
        let root = TempDir::new().unwrap();
        let album = root.path().join("Artist/Album");
        std::fs::create_dir_all(&album).unwrap();
        write_mp3_with_artwork(&album.join("01.mp3"), 8, 8);
        write_image(&album.join("cover.jpg"), 2, 2, ImageFormat::Jpeg);

        let artwork = resolver().resolve(root.path(), "Artist/Album/01.mp3").unwrap();
        assert_eq!(artwork.origin(), &ArtworkOrigin::Embedded);
        assert_eq!(artwork.width(), 8);
    }

    #[test]
    fn test_falls_back_to_directory() {
        let root = TempDir::new().unwrap();
        let album = root.path().join("Album");
        std::fs::create_dir_all(&album).unwrap();
        write_mp3_without_artwork(&album.join("01.mp3"));
        write_image(&album.join("cover.jpg"), 2, 3, ImageFormat::Jpeg);

        let artwork = resolver().resolve(root.path(), "Album/01.mp3").unwrap();
        assert_eq!(
            artwork.origin(),
            &ArtworkOrigin::Directory(album.join("cover.jpg"))
        );
        assert_eq!((artwork.width(), artwork.height()), (2, 3));
    }

    #[test]
    fn test_falls_back_for_non_audio_content() {
        let root = TempDir::new().unwrap();
        std::fs::write(root.path().join("01.flac"), b"garbage").unwrap();
        write_image(&root.path().join("Front.png"), 5, 5, ImageFormat::Png);

        let artwork = resolver().resolve(root.path(), "01.flac").unwrap();
        assert!(artwork.path().is_some());
    }

    #[test]
    fn test_falls_back_when_sniffer_not_loaded() {
        let root = TempDir::new().unwrap();
        write_mp3_with_artwork(&root.path().join("01.mp3"), 8, 8);
        write_image(&root.path().join("cover.png"), 1, 1, ImageFormat::Png);

        let resolver = ArtworkResolver::default();
        let artwork = resolver.resolve(root.path(), "01.mp3").unwrap();
        assert_eq!(artwork.width(), 1);
    }

    #[test]
    fn test_missing_track_still_scans_directory() {
        let root = TempDir::new().unwrap();
        write_image(&root.path().join("folder.png"), 2, 2, ImageFormat::Png);

        let artwork = resolver().resolve(root.path(), "gone.mp3").unwrap();
        assert_eq!(artwork.width(), 2);
    }

    #[test]
    fn test_no_artwork_anywhere() {
        let root = TempDir::new().unwrap();
        write_mp3_without_artwork(&root.path().join("01.mp3"));

        assert!(resolver().resolve(root.path(), "01.mp3").is_none());
    }
}
