//! Header record and file envelope parsing.
//!
//! # File Layout
//! ```text
//! [i32]  header size (bytes)
//! [u32]  header CRC (stored, not verified)
//! [i32]  major version
//! [i32]  minor version
//! [i32]  net version (only when major > 865 and minor > 17)
//! [Text] game type
//! [Dict] header properties
//! ```

use log::{debug, info};

use crate::propbag::cursor::Cursor;
use crate::propbag::options::ParseOptions;
use crate::propbag::types::error::{PropbagError, Result};
use crate::propbag::types::models::{HeaderRecord, ParsedFile};
use super::properties::PropertyDecoder;
use super::text::parse_text;

/// Versions above both of these carry a net version field.
const NET_VERSION_MIN_MAJOR: i32 = 865;
const NET_VERSION_MIN_MINOR: i32 = 17;

/// Whether a header with these versions carries a net version field.
pub fn has_net_version(major_version: i32, minor_version: i32) -> bool {
    major_version > NET_VERSION_MIN_MAJOR && minor_version > NET_VERSION_MIN_MINOR
}

/// Parses the envelope fields and then the header record.
///
/// The declared header size is only checked for availability; the header
/// itself is decoded from the same cursor, not from a bounded sub-view.
pub fn parse(cursor: &mut Cursor, options: &ParseOptions) -> Result<ParsedFile> {
    info!("Parsing property bag header ({} bytes available)", cursor.remaining_length());

    let header_size = cursor.take_i32()?;
    let header_crc = cursor.take_u32()?;
    debug!("Header size: {} bytes, stored CRC: {:#010x}", header_size, header_crc);

    let available = usize::try_from(header_size)
        .map_err(|_| PropbagError::HeaderError(format!("negative header size {}", header_size)))?;
    cursor.peek(available)?;

    let header = parse_header(cursor, options)?;

    info!(
        "Header parsed: version={}.{}, net_version={:?}, game_type='{}', {} properties",
        header.major_version,
        header.minor_version,
        header.net_version,
        header.game_type,
        header.properties.len()
    );

    Ok(ParsedFile {
        header_size,
        header_crc,
        header,
    })
}

/// Parses the versioned header record.
pub fn parse_header(cursor: &mut Cursor, options: &ParseOptions) -> Result<HeaderRecord> {
    let major_version = cursor.take_i32()?;
    let minor_version = cursor.take_i32()?;

    let net_version = if has_net_version(major_version, minor_version) {
        Some(cursor.take_i32()?)
    } else {
        None
    };
    debug!(
        "Header versions: major={}, minor={}, net={:?}",
        major_version, minor_version, net_version
    );

    if net_version.is_none() {
        return Err(PropbagError::HeaderError(format!(
            "version {}.{} has no net version; only major > {} with minor > {} is supported",
            major_version, minor_version, NET_VERSION_MIN_MAJOR, NET_VERSION_MIN_MINOR
        )));
    }

    let game_type = parse_text(cursor, options)?;
    let properties = PropertyDecoder::new(cursor, options).parse_dict()?;

    Ok(HeaderRecord {
        major_version,
        minor_version,
        net_version,
        game_type,
        properties,
    })
}
