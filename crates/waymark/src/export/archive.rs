//! Zip packing for QR exports.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use waymark_common::WaymarkError;

/// Pack `(name, bytes)` pairs into an in-memory zip, in the given order.
///
/// PNG data is already compressed, so entries are stored as-is.
pub fn pack_archive<'a, I>(entries: I) -> Result<Vec<u8>, WaymarkError>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
{
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    for (name, bytes) in entries {
        zip.start_file(name, options)
            .map_err(|e| WaymarkError::Archive(format!("{}: {}", name, e)))?;
        zip.write_all(bytes)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| WaymarkError::Archive(e.to_string()))?;

    Ok(cursor.into_inner())
}
