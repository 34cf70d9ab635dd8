//! JSON rendering of a decoded header record.
//!
//! Output is indented with four spaces per level. Dictionaries keep their
//! wire order. Non-finite float values (NaN and the infinities) have no
//! JSON form and render as `null`.

use std::io::Write;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use super::types::error::{PropbagError, Result};
use super::types::models::HeaderRecord;

const INDENT: &[u8] = b"    ";

/// Serializes the record as indented JSON.
pub fn to_json_string(header: &HeaderRecord) -> Result<String> {
    let mut out = Vec::new();
    write_json(&mut out, header)?;
    String::from_utf8(out).map_err(|err| PropbagError::DecodeError {
        context: "JSON output",
        offset: err.utf8_error().valid_up_to(),
        reason: err.to_string(),
    })
}

/// Streams the record as indented JSON into `writer`.
pub fn write_json<W: Write>(writer: W, header: &HeaderRecord) -> Result<()> {
    let mut serializer = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    header.serialize(&mut serializer)?;
    Ok(())
}

/// Serializes the record as single-line JSON.
pub fn to_compact_json_string(header: &HeaderRecord) -> Result<String> {
    Ok(serde_json::to_string(header)?)
}
