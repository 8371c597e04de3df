//! Bounded artwork cache
//!
//! Keeps the artwork of the last few distinct tracks so that re-showing a
//! notification for the current track, or going back a track, does not hit
//! the disk again. Eviction is round-robin over a fixed set of slots: the
//! oldest insertion goes first, however recently it was read.

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use super::Artwork;
use super::resolver::{ArtworkResolver, ResolveArtwork};

/// Number of tracks whose artwork is kept
pub const ARTWORK_CACHE_CAPACITY: usize = 3;

/// One cached lookup; `artwork` is None when the track has no artwork
#[derive(Debug)]
struct CacheSlot {
    uri: String,
    artwork: Option<Arc<Artwork>>,
}

/// Fixed-capacity FIFO cache in front of an artwork resolver
#[derive(Debug)]
pub struct ArtworkCache<R = ArtworkResolver> {
    resolver: R,
    slots: [Option<CacheSlot>; ARTWORK_CACHE_CAPACITY],
    /// Next slot to fill
    cursor: usize,
}

impl<R: ResolveArtwork> ArtworkCache<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            slots: std::array::from_fn(|_| None),
            cursor: 0,
        }
    }

    /// Artwork for `uri` under `root`, resolving it on a miss
    ///
    /// A miss always stores its result, including "no artwork", so a track
    /// without artwork is only resolved again once it has been evicted. The
    /// returned image stays owned by the cache as well as by the caller.
    pub fn lookup(&mut self, root: &Path, uri: &str) -> Option<Arc<Artwork>> {
        if uri.is_empty() {
            tracing::warn!("Refusing artwork lookup for an empty track path");
            return None;
        }

        tracing::debug!("Retrieving artwork {}", uri);
        for (i, slot) in self.slots.iter().enumerate() {
            tracing::debug!(
                "Cached artworks [{}] {:?}",
                i,
                slot.as_ref().map(|s| s.uri.as_str())
            );
        }

        if let Some(slot) = self.find(uri) {
            tracing::debug!("Getting artwork from cache");
            return slot.artwork.clone();
        }

        let artwork = self.resolver.resolve(root, uri).map(Arc::new);
        self.store(uri, artwork.clone());
        artwork
    }

    fn find(&self, uri: &str) -> Option<&CacheSlot> {
        self.slots.iter().flatten().find(|slot| slot.uri == uri)
    }

    fn store(&mut self, uri: &str, artwork: Option<Arc<Artwork>>) {
        if let Some(slot) = self.slots.iter_mut().flatten().find(|slot| slot.uri == uri) {
            slot.artwork = artwork;
            return;
        }

        let slot = CacheSlot {
            uri: uri.to_string(),
            artwork,
        };
        if let Some(previous) = self.slots[self.cursor].replace(slot) {
            tracing::debug!("Replacing artwork of {} in the cache", previous.uri);
        }
        self.cursor = (self.cursor + 1) % ARTWORK_CACHE_CAPACITY;
    }

    /// Whether `uri` has a slot, with or without artwork
    pub fn contains(&self, uri: &str) -> bool {
        self.find(uri).is_some()
    }

    /// Cached track paths in slot order
    pub fn uris(&self) -> Vec<&str> {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.uri.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every entry and start filling from the first slot again
    pub fn clear(&mut self) {
        self.slots = std::array::from_fn(|_| None);
        self.cursor = 0;
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }
}

/// Artwork cache shared between threads
///
/// Each lookup holds the lock for the whole get-or-resolve, so concurrent
/// lookups of one track resolve it once.
#[derive(Debug)]
pub struct SharedArtworkCache<R = ArtworkResolver> {
    inner: Arc<Mutex<ArtworkCache<R>>>,
}

impl<R> Clone for SharedArtworkCache<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: ResolveArtwork> SharedArtworkCache<R> {
    pub fn new(cache: ArtworkCache<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn lookup(&self, root: &Path, uri: &str) -> Option<Arc<Artwork>> {
        self.inner.lock().lookup(root, uri)
    }

    /// Run `f` with exclusive access to the cache
    pub fn with<T>(&self, f: impl FnOnce(&mut ArtworkCache<R>) -> T) -> T {
        f(&mut self.inner.lock())
    }
}
