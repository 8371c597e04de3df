//! Content-based media type sniffing
//!
//! Detects an audio container from the file's leading bytes (never from its
//! extension) and reports it as a MIME type. The signature database is
//! loaded explicitly with [`MediaTypeSniffer::init`] and released with
//! [`MediaTypeSniffer::teardown`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lofty::file::FileType;
use lofty::probe::Probe;
use thiserror::Error;

/// Media types that carry embedded artwork by default
pub const DEFAULT_EMBEDDED_MEDIA_TYPES: &[&str] = &["audio/mpeg"];

/// Errors raised while loading the signature database
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnifferError {
    #[error("media type database is already loaded")]
    AlreadyInitialised,

    #[error("no embedded-artwork media types configured")]
    EmptyDatabase,

    #[error("no signature known for media type '{0}'")]
    UnknownMediaType(String),
}

/// Outcome of sniffing a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    /// Unreadable, unrecognised content, or no database loaded
    NoSignature,
    /// A recognised container that is not configured for embedded artwork
    Unsupported(&'static str),
    /// A container the embedded extractor should open
    Supported {
        mime: &'static str,
        file_type: FileType,
    },
}

/// MIME type reported for a detected container
fn mime_for(file_type: &FileType) -> Option<&'static str> {
    let mime = match file_type {
        FileType::Aac => "audio/aac",
        FileType::Aiff => "audio/x-aiff",
        FileType::Ape => "audio/x-ape",
        FileType::Flac => "audio/flac",
        FileType::Mpeg => "audio/mpeg",
        FileType::Mp4 => "audio/mp4",
        FileType::Mpc => "audio/x-musepack",
        FileType::Opus | FileType::Vorbis | FileType::Speex => "audio/ogg",
        FileType::Wav => "audio/x-wav",
        FileType::WavPack => "audio/x-wavpack",
        _ => return None,
    };
    Some(mime)
}

/// Every MIME type the database has a signature for
const KNOWN_MEDIA_TYPES: &[&str] = &[
    "audio/aac",
    "audio/x-aiff",
    "audio/x-ape",
    "audio/flac",
    "audio/mpeg",
    "audio/mp4",
    "audio/x-musepack",
    "audio/ogg",
    "audio/x-wav",
    "audio/x-wavpack",
];

/// Loaded signature database: the MIME types eligible for extraction
#[derive(Debug)]
struct SignatureDatabase {
    embedded: Vec<&'static str>,
}

impl SignatureDatabase {
    fn load<S: AsRef<str>>(types: &[S]) -> Result<Self, SnifferError> {
        if types.is_empty() {
            return Err(SnifferError::EmptyDatabase);
        }

        let mut embedded = Vec::with_capacity(types.len());
        for requested in types {
            let requested = requested.as_ref().trim();
            let known = KNOWN_MEDIA_TYPES
                .iter()
                .find(|known| known.eq_ignore_ascii_case(requested))
                .ok_or_else(|| SnifferError::UnknownMediaType(requested.to_string()))?;
            if !embedded.contains(known) {
                embedded.push(*known);
            }
        }

        Ok(Self { embedded })
    }
}

/// Owner of the media type signature database
#[derive(Debug, Default)]
pub struct MediaTypeSniffer {
    database: Option<SignatureDatabase>,
}

impl MediaTypeSniffer {
    /// Create a sniffer with no database loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the signature database for the given embedded-artwork media types
    ///
    /// On failure nothing is retained and the sniffer stays unloaded.
    pub fn init<S: AsRef<str>>(&mut self, embedded_types: &[S]) -> Result<(), SnifferError> {
        if self.database.is_some() {
            return Err(SnifferError::AlreadyInitialised);
        }

        let database = SignatureDatabase::load(embedded_types)?;
        tracing::debug!(
            "Loaded media type database, embedded artwork types: {:?}",
            database.embedded
        );
        self.database = Some(database);
        Ok(())
    }

    /// Release the signature database; a no-op when nothing is loaded
    pub fn teardown(&mut self) {
        if self.database.take().is_some() {
            tracing::debug!("Closed media type database");
        }
    }

    pub fn is_initialised(&self) -> bool {
        self.database.is_some()
    }

    /// Sniff the media type of `path` from its content
    pub fn sniff(&self, path: &Path) -> Sniffed {
        let Some(database) = &self.database else {
            tracing::debug!("Media type database not loaded, skipping {:?}", path);
            return Sniffed::NoSignature;
        };

        let file_type = match Self::detect(path) {
            Ok(Some(file_type)) => file_type,
            Ok(None) => {
                tracing::warn!("We did not get a MIME type for {:?}", path);
                return Sniffed::NoSignature;
            }
            Err(e) => {
                tracing::warn!("Could not sniff {:?}: {}", path, e);
                return Sniffed::NoSignature;
            }
        };

        let Some(mime) = mime_for(&file_type) else {
            tracing::warn!("We did not get a MIME type for {:?}", path);
            return Sniffed::NoSignature;
        };

        tracing::debug!("MIME type for {:?} is: {}", path, mime);

        if database.embedded.contains(&mime) {
            Sniffed::Supported { mime, file_type }
        } else {
            Sniffed::Unsupported(mime)
        }
    }

    /// Content-only detection; the extension is never consulted
    fn detect(path: &Path) -> std::io::Result<Option<FileType>> {
        let reader = BufReader::new(File::open(path)?);
        Ok(Probe::new(reader).guess_file_type()?.file_type())
    }
}

impl Drop for MediaTypeSniffer {
    fn drop(&mut self) {
        self.teardown();
    }
}
