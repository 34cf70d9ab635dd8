//! Core data structures for the decoded property tree.
//!
//! This module defines the types produced by the decoder:
//! - The header record that is the sole output of a parse
//! - Property dictionaries and the closed set of property values
//! - The property kind tags understood on the wire

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// Key that terminates a property dictionary on the wire.
pub const SENTINEL_KEY: &str = "None";

/// The property type tags recognised by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Bool,
    Byte,
    Array,
    Float,
    Int,
    Name,
    Str,
    Struct,
    QWord,
}

impl PropertyKind {
    /// Looks up a wire tag such as `"IntProperty"`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "BoolProperty" => Some(Self::Bool),
            "ByteProperty" => Some(Self::Byte),
            "ArrayProperty" => Some(Self::Array),
            "FloatProperty" => Some(Self::Float),
            "IntProperty" => Some(Self::Int),
            "NameProperty" => Some(Self::Name),
            "StrProperty" => Some(Self::Str),
            "StructProperty" => Some(Self::Struct),
            "QWordProperty" => Some(Self::QWord),
            _ => None,
        }
    }

    /// The tag as it appears on the wire.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Bool => "BoolProperty",
            Self::Byte => "ByteProperty",
            Self::Array => "ArrayProperty",
            Self::Float => "FloatProperty",
            Self::Int => "IntProperty",
            Self::Name => "NameProperty",
            Self::Str => "StrProperty",
            Self::Struct => "StructProperty",
            Self::QWord => "QWordProperty",
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// Enum-like payload of a `ByteProperty`: the enum type name and the chosen value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ByteValue {
    pub kind: String,
    pub value: String,
}

/// Payload of a `StructProperty`.
///
/// The wire carries a struct name before the nested fields and a second
/// name after them; both are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructValue {
    pub struct_name: String,
    pub trailing_name: String,
    pub fields: PropertyDict,
}

/// A single decoded property payload.
///
/// One arm per known property kind. Serializes untagged, so the JSON view
/// shows the bare payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Byte(ByteValue),
    Array(Vec<PropertyDict>),
    Float(f32),
    Int(i32),
    Name(String),
    Str(String),
    Struct(StructValue),
    QWord(u64),
}

impl PropertyValue {
    /// The property kind this value was decoded from.
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Bool(_) => PropertyKind::Bool,
            Self::Byte(_) => PropertyKind::Byte,
            Self::Array(_) => PropertyKind::Array,
            Self::Float(_) => PropertyKind::Float,
            Self::Int(_) => PropertyKind::Int,
            Self::Name(_) => PropertyKind::Name,
            Self::Str(_) => PropertyKind::Str,
            Self::Struct(_) => PropertyKind::Struct,
            Self::QWord(_) => PropertyKind::QWord,
        }
    }

    /// Text payload of a `NameProperty` or `StrProperty`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Name(s) | Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PropertyDict]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// An insertion-ordered mapping from property name to value.
///
/// A repeated key overwrites the earlier value but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PropertyDict {
    entries: IndexMap<String, PropertyValue>,
}

impl PropertyDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, returning the value it replaced, if any.
    pub fn insert(&mut self, key: String, value: PropertyValue) -> Option<PropertyValue> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The decoded header record, the sole output of a parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderRecord {
    pub major_version: i32,
    pub minor_version: i32,
    /// Only newer format revisions carry this field; the decoder refuses
    /// files without it, so a decoded record always has `Some`.
    pub net_version: Option<i32>,
    pub game_type: String,
    pub properties: PropertyDict,
}

/// A fully parsed file: the envelope fields followed by the header record.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFile {
    /// Declared header length in bytes. Only checked for availability.
    pub header_size: i32,
    /// Header checksum as stored. Never verified.
    pub header_crc: u32,
    pub header: HeaderRecord,
}
