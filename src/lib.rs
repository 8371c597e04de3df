//! Trackart - artwork lookup for track-change notifications
//!
//! Given a music root and a track path relative to it, finds the track's
//! cover image (embedded first, then a loose file in its directory) and
//! keeps the last few results in memory.

pub mod artwork;
pub mod settings;

pub use artwork::{
    ARTWORK_CACHE_CAPACITY, Artwork, ArtworkCache, ArtworkOrigin, ArtworkResolver,
    DirectoryScanner, MediaTypeSniffer, ResolveArtwork, SharedArtworkCache,
};
pub use settings::ArtworkSettings;
