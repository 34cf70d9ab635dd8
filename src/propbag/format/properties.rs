//! The recursive property dictionary grammar.
//!
//! # Property Layout
//! ```text
//! [String]  key          ("None" ends the dictionary)
//! [String]  kind tag
//! [u32]     declared payload size (not authoritative)
//! [4 bytes] reserved
//! [...]     payload, shape selected by the kind tag
//! ```
//!
//! The declared size is never used to bound a read: each kind consumes
//! exactly what its own grammar rule describes.

use log::{debug, trace};

use crate::propbag::cursor::Cursor;
use crate::propbag::options::ParseOptions;
use crate::propbag::types::error::{PropbagError, Result};
use crate::propbag::types::models::{
    ByteValue, PropertyDict, PropertyKind, PropertyValue, StructValue, SENTINEL_KEY,
};
use super::text::{parse_str, parse_text};

/// Decodes one property dictionary from the cursor.
pub fn parse_dict(cursor: &mut Cursor, options: &ParseOptions) -> Result<PropertyDict> {
    PropertyDecoder::new(cursor, options).parse_dict()
}

/// Decodes an unsigned-count array of property dictionaries.
pub fn parse_dict_array(cursor: &mut Cursor, options: &ParseOptions) -> Result<Vec<PropertyDict>> {
    PropertyDecoder::new(cursor, options).parse_dict_array()
}

/// Grammar state for one decode: borrowed cursor, limits, and current nesting depth.
pub struct PropertyDecoder<'a> {
    cursor: &'a mut Cursor,
    options: &'a ParseOptions,
    depth: usize,
}

impl<'a> PropertyDecoder<'a> {
    pub fn new(cursor: &'a mut Cursor, options: &'a ParseOptions) -> Self {
        Self {
            cursor,
            options,
            depth: 0,
        }
    }

    /// Reads properties until the sentinel key.
    pub fn parse_dict(&mut self) -> Result<PropertyDict> {
        let mut dict = PropertyDict::new();

        loop {
            let key = parse_str(self.cursor)?;
            if key == SENTINEL_KEY {
                break;
            }

            let tag_offset = self.cursor.position();
            let tag = parse_str(self.cursor)?;
            let declared_size = self.cursor.take_u32()?;
            self.cursor.advance(4)?;

            let kind = PropertyKind::from_tag(&tag).ok_or(PropbagError::UnknownPropertyKind {
                kind: tag,
                offset: tag_offset,
            })?;
            trace!(
                "Property '{}' ({}) at offset {}, declared size {}",
                key,
                kind,
                tag_offset,
                declared_size
            );

            let payload_start = self.cursor.position();
            let value = self.parse_value(kind)?;
            self.check_declared_size(&key, kind, declared_size, payload_start);

            match value {
                Some(value) => {
                    if dict.insert(key, value).is_some() {
                        debug!(
                            "Duplicate property key at offset {}; keeping the later value",
                            tag_offset
                        );
                    }
                }
                None => trace!("ByteProperty '{}' has no enum type; not stored", key),
            }
        }

        Ok(dict)
    }

    /// Reads an unsigned 32-bit count followed by that many dictionaries.
    pub fn parse_dict_array(&mut self) -> Result<Vec<PropertyDict>> {
        let offset = self.cursor.position();
        let count = self.cursor.take_u32()?;
        self.parse_dicts(i64::from(count), offset)
    }

    /// Payload of an `ArrayProperty`. The count is read signed, unlike
    /// [`parse_dict_array`](Self::parse_dict_array); a negative count yields
    /// an empty array.
    fn parse_array_property(&mut self) -> Result<Vec<PropertyDict>> {
        let offset = self.cursor.position();
        let count = self.cursor.take_i32()?;
        self.parse_dicts(i64::from(count), offset)
    }

    fn parse_dicts(&mut self, count: i64, offset: usize) -> Result<Vec<PropertyDict>> {
        let limit = i64::from(self.options.max_array_len);
        if count > limit {
            return Err(PropbagError::SizeLimitExceeded {
                context: "array element count",
                limit,
                found: count,
                offset,
            });
        }

        let count = count.max(0) as usize;
        let mut items = Vec::with_capacity(count);
        for _ in 0..count {
            items.push(self.descend(Self::parse_dict)?);
        }
        Ok(items)
    }

    /// Decodes the payload for `kind`. Returns `None` for a `ByteProperty`
    /// whose enum type is the sentinel, which contributes nothing.
    fn parse_value(&mut self, kind: PropertyKind) -> Result<Option<PropertyValue>> {
        let value = match kind {
            PropertyKind::Bool => PropertyValue::Bool(self.cursor.take_u8()? == 1),
            PropertyKind::Byte => {
                let enum_kind = parse_str(self.cursor)?;
                // A sentinel enum type is followed by a single byte and no
                // value; the key is dropped. Unconfirmed whether the format
                // intends this or the byte is real data.
                if enum_kind == SENTINEL_KEY {
                    self.cursor.advance(1)?;
                    return Ok(None);
                }
                let value = parse_str(self.cursor)?;
                PropertyValue::Byte(ByteValue {
                    kind: enum_kind,
                    value,
                })
            }
            PropertyKind::Array => PropertyValue::Array(self.parse_array_property()?),
            PropertyKind::Float => PropertyValue::Float(self.cursor.take_f32()?),
            PropertyKind::Int => PropertyValue::Int(self.cursor.take_i32()?),
            PropertyKind::Name => PropertyValue::Name(parse_text(self.cursor, self.options)?),
            PropertyKind::Str => PropertyValue::Str(parse_text(self.cursor, self.options)?),
            PropertyKind::Struct => {
                let struct_name = parse_str(self.cursor)?;
                let fields = self.descend(Self::parse_dict)?;
                let trailing_name = parse_str(self.cursor)?;
                PropertyValue::Struct(StructValue {
                    struct_name,
                    trailing_name,
                    fields,
                })
            }
            PropertyKind::QWord => PropertyValue::QWord(self.cursor.take_u64()?),
        };
        Ok(Some(value))
    }

    /// Runs `f` one nesting level deeper, failing once the depth limit is reached.
    fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(PropbagError::DepthExceeded {
                limit: self.options.max_depth,
                offset: self.cursor.position(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn check_declared_size(&self, key: &str, kind: PropertyKind, declared: u32, start: usize) {
        if !self.options.check_declared_sizes {
            return;
        }
        let consumed = self.cursor.position() - start;
        if consumed as u64 != u64::from(declared) {
            debug!(
                "Declared size mismatch for '{}' ({}) at offset {}: declared {}, consumed {}",
                key, kind, start, declared, consumed
            );
        }
    }
}
