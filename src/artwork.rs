//! Artwork resolution and caching
//!
//! Finds the cover image for a track from two sources, in order:
//! 1. A picture embedded in the media file (ID3 APIC, FLAC picture block, ...)
//! 2. A loose image in the track's directory (cover.jpg, folder.png, ...)
//!
//! Results are memoised in a small FIFO cache keyed by the track's
//! relative path.

use std::path::{Path, PathBuf};

use image::DynamicImage;

pub mod cache;
pub mod directory;
pub mod embedded;
pub mod error;
pub mod resolver;
pub mod sniffer;

pub use cache::{ARTWORK_CACHE_CAPACITY, ArtworkCache, SharedArtworkCache};
pub use directory::{DEFAULT_ARTWORK_PATTERN, DirectoryScanner};
pub use error::ArtworkError;
pub use resolver::{ArtworkResolver, ResolveArtwork};
pub use sniffer::{DEFAULT_EMBEDDED_MEDIA_TYPES, MediaTypeSniffer, Sniffed, SnifferError};

/// Where a piece of artwork was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtworkOrigin {
    /// Attached picture inside the media file
    Embedded,
    /// Image file next to the media file
    Directory(PathBuf),
}

/// A decoded cover image
#[derive(Debug, Clone)]
pub struct Artwork {
    image: DynamicImage,
    origin: ArtworkOrigin,
}

impl Artwork {
    pub fn new(image: DynamicImage, origin: ArtworkOrigin) -> Self {
        Self { image, origin }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn origin(&self) -> &ArtworkOrigin {
        &self.origin
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Path of the loose image file, None for embedded artwork
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            ArtworkOrigin::Embedded => None,
            ArtworkOrigin::Directory(path) => Some(path),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Image and media fixtures shared by the artwork tests

    use std::io::Cursor;
    use std::path::Path;

    use image::{ImageFormat, Rgb, RgbImage};

    /// Encode a solid-colour image of the given size
    pub(crate) fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 90]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    pub(crate) fn write_image(path: &Path, width: u32, height: u32, format: ImageFormat) {
        std::fs::write(path, encoded_image(width, height, format)).unwrap();
    }

    /// MPEG-1 Layer III, 128 kbps, 44.1 kHz, no padding
    const MPEG_FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
    const MPEG_FRAME_LEN: usize = 417;

    /// A few silent MPEG audio frames
    pub(crate) fn mpeg_frames() -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MPEG_FRAME_LEN * 4);
        for _ in 0..4 {
            bytes.extend_from_slice(&MPEG_FRAME_HEADER);
            bytes.extend(std::iter::repeat_n(0u8, MPEG_FRAME_LEN - 4));
        }
        bytes
    }

    fn syncsafe(len: usize) -> [u8; 4] {
        let len = len as u32;
        [
            ((len >> 21) & 0x7F) as u8,
            ((len >> 14) & 0x7F) as u8,
            ((len >> 7) & 0x7F) as u8,
            (len & 0x7F) as u8,
        ]
    }

    /// ID3v2.3 tag holding a single front-cover APIC frame
    pub(crate) fn id3_with_picture(mime: &str, picture: &[u8]) -> Vec<u8> {
        let mut body = vec![0x00];
        body.extend_from_slice(mime.as_bytes());
        body.push(0x00);
        body.push(0x03);
        body.push(0x00);
        body.extend_from_slice(picture);

        let mut frame = b"APIC".to_vec();
        frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
        frame.extend_from_slice(&[0x00, 0x00]);
        frame.extend_from_slice(&body);

        let mut tag = b"ID3".to_vec();
        tag.extend_from_slice(&[0x03, 0x00, 0x00]);
        tag.extend_from_slice(&syncsafe(frame.len()));
        tag.extend_from_slice(&frame);
        tag
    }

    /// MPEG file whose ID3v2 tag embeds a PNG of the given size
    pub(crate) fn write_mp3_with_artwork(path: &Path, width: u32, height: u32) {
        let png = encoded_image(width, height, ImageFormat::Png);
        let mut bytes = id3_with_picture("image/png", &png);
        bytes.extend(mpeg_frames());
        std::fs::write(path, bytes).unwrap();
    }

    /// MPEG file with no tag at all
    pub(crate) fn write_mp3_without_artwork(path: &Path) {
        std::fs::write(path, mpeg_frames()).unwrap();
    }
}
