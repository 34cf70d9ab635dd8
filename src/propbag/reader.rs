use std::fs;
use std::path::Path;

use log::info;

use super::cursor::Cursor;
use super::format;
use super::options::ParseOptions;
use super::types::error::Result;
use super::types::models::{HeaderRecord, ParsedFile};

/// Decodes an in-memory property bag file into its header record.
pub fn parse_bytes(bytes: impl Into<Vec<u8>>, options: &ParseOptions) -> Result<HeaderRecord> {
    parse_bytes_with_envelope(bytes, options).map(|parsed| parsed.header)
}

/// Decodes an in-memory property bag file, keeping the envelope fields.
pub fn parse_bytes_with_envelope(
    bytes: impl Into<Vec<u8>>,
    options: &ParseOptions,
) -> Result<ParsedFile> {
    let mut cursor = Cursor::new(bytes);
    format::header::parse(&mut cursor, options)
}

/// Loads a whole file into memory and decodes it.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The file is truncated, oversized, or otherwise malformed
/// - A property uses a kind tag the decoder does not know
pub fn parse_file(path: impl AsRef<Path>, options: &ParseOptions) -> Result<ParsedFile> {
    let path = path.as_ref();
    info!("Opening property bag file: {}", path.display());
    let bytes = fs::read(path)?;
    let parsed = parse_bytes_with_envelope(bytes, options)?;
    info!(
        "Decoded {}: {} top-level properties",
        path.display(),
        parsed.header.properties.len()
    );
    Ok(parsed)
}
