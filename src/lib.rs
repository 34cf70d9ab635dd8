//! # propbag-reader
//!
//! A decoder for the binary "property bag" containers found at the front of
//! game save and replay files.
//!
//! A property bag is a self-describing sequence of `(name, type tag, payload)`
//! triples terminated by the name `"None"`. Payloads may nest further bags
//! through struct and array properties. The decoder turns the file header
//! into a [`HeaderRecord`] tree that can be rendered as JSON.
//!
//! ```no_run
//! use propbag_reader::{parse_file, ParseOptions};
//!
//! let parsed = parse_file("match.replay", &ParseOptions::default()).unwrap();
//! println!("{}", parsed.header.game_type);
//! ```
pub mod propbag;

// Re-export the main types for convenience
pub use propbag::{
    parse_bytes,
    parse_bytes_with_envelope,
    parse_file,
    render::{to_json_string, write_json},
    models::{
        ByteValue,
        HeaderRecord,
        ParsedFile,
        PropertyDict,
        PropertyKind,
        PropertyValue,
        StructValue,
    },
    Cursor,
    ParseOptions,
    PropbagError,
    Result,
};
