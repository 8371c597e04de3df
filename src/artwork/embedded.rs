//! Embedded picture extraction
//!
//! Reads the first attached picture out of a media file's own tags. Only
//! containers the sniffer reports as supported are opened.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::{FileType, TaggedFileExt};
use lofty::probe::Probe;

use super::error::{ArtworkError, Result};
use super::sniffer::{MediaTypeSniffer, Sniffed};
use super::{Artwork, ArtworkOrigin};

/// Extract and decode the first attached picture in `path`
///
/// Anything but `Ok` means the caller should try another source.
pub fn extract_embedded(sniffer: &MediaTypeSniffer, path: &Path) -> Result<Artwork> {
    let file_type = match sniffer.sniff(path) {
        Sniffed::Supported { file_type, .. } => file_type,
        Sniffed::Unsupported(mime) => {
            return Err(ArtworkError::NotApplicable(mime.to_string()));
        }
        Sniffed::NoSignature => {
            return Err(ArtworkError::NotApplicable("no media type".to_string()));
        }
    };

    let data = read_attached_picture(path, file_type)?;
    tracing::debug!("Found artwork in media file {:?}", path);

    let image = image::load_from_memory(&data)?;
    Ok(Artwork::new(image, ArtworkOrigin::Embedded))
}

/// Raw bytes of the first attached picture, primary tag first
///
/// The file handle lives only for the duration of this call.
fn read_attached_picture(path: &Path, file_type: FileType) -> Result<Vec<u8>> {
    let reader = BufReader::new(File::open(path)?);
    let tagged_file = Probe::new(reader)
        .set_file_type(file_type)
        .options(ParseOptions::new().read_properties(false))
        .read()?;

    tagged_file
        .primary_tag()
        .into_iter()
        .chain(tagged_file.tags())
        .flat_map(|tag| tag.pictures())
        .next()
        .map(|picture| picture.data().to_vec())
        .ok_or_else(|| ArtworkError::NoAttachedPicture(path.to_path_buf()))
}
