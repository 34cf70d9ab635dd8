//! Length-prefixed string fields.
//!
//! Two string shapes appear on the wire:
//!
//! ```text
//! String:  [i32 n]  [n bytes UTF-8, last byte is NUL]
//! Text:    [i32 c]  c >= 0 -> [c bytes Windows-1252, last byte is NUL]
//!                   c <  0 -> [-c * 2 bytes UTF-16LE, last unit is NUL]
//! ```
//!
//! The terminator is dropped without being checked.

use encoding_rs::{Encoding, UTF_16LE, UTF_8, WINDOWS_1252};
use log::trace;

use crate::propbag::cursor::Cursor;
use crate::propbag::options::ParseOptions;
use crate::propbag::types::error::{PropbagError, Result};

/// Code points Windows-1252 leaves unassigned. `encoding_rs` maps them to C1
/// controls; the format's strict codec rejects them.
const WINDOWS_1252_UNDEFINED: [u8; 5] = [0x81, 0x8D, 0x8F, 0x90, 0x9D];

/// Reads a narrow, NUL-terminated UTF-8 string.
pub fn parse_str(cursor: &mut Cursor) -> Result<String> {
    let offset = cursor.position();
    let len = cursor.take_i32()?;
    if len < 0 {
        return Err(PropbagError::DecodeError {
            context: "string",
            offset,
            reason: format!("negative length {}", len),
        });
    }
    read_terminated(cursor, len as usize, 1, UTF_8, "string")
}

/// Reads a text value whose encoding is selected by the sign of its character count.
pub fn parse_text(cursor: &mut Cursor, options: &ParseOptions) -> Result<String> {
    let offset = cursor.position();
    let chars = cursor.take_i32()?;
    let max = options.max_text_chars;
    if !(-max..=max).contains(&chars) {
        return Err(PropbagError::SizeLimitExceeded {
            context: "text character count",
            limit: i64::from(max),
            found: i64::from(chars),
            offset,
        });
    }

    if chars == 0 {
        return Ok(String::new());
    }

    if chars < 0 {
        let byte_len = chars.unsigned_abs() as usize * 2;
        trace!("UTF-16LE text: {} bytes at offset {}", byte_len, offset);
        read_terminated(cursor, byte_len, 2, UTF_16LE, "UTF-16 text")
    } else {
        trace!("Windows-1252 text: {} bytes at offset {}", chars, offset);
        read_terminated(cursor, chars as usize, 1, WINDOWS_1252, "Windows-1252 text")
    }
}

/// Decodes `len` bytes minus a `terminator`-byte trailer, then advances past all of them.
fn read_terminated(
    cursor: &mut Cursor,
    len: usize,
    terminator: usize,
    encoding: &'static Encoding,
    context: &'static str,
) -> Result<String> {
    let offset = cursor.position();
    let text = {
        let bytes = cursor.peek(len)?;
        let body = &bytes[..len.saturating_sub(terminator)];
        if encoding == WINDOWS_1252 {
            if let Some(pos) = body.iter().position(|b| WINDOWS_1252_UNDEFINED.contains(b)) {
                return Err(PropbagError::DecodeError {
                    context,
                    offset: offset + pos,
                    reason: format!("byte {:#04x} is undefined in windows-1252", body[pos]),
                });
            }
        }
        encoding
            .decode_without_bom_handling_and_without_replacement(body)
            .ok_or_else(|| PropbagError::DecodeError {
                context,
                offset,
                reason: format!("invalid {} byte sequence", encoding.name()),
            })?
            .into_owned()
    };
    cursor.advance(len)?;
    Ok(text)
}
