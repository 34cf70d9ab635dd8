//! Core property bag decoder module

pub mod cursor;
pub mod format;
pub mod options;
pub mod reader;
pub mod render;
pub mod types;

pub use cursor::Cursor;
pub use options::ParseOptions;
pub use reader::{parse_bytes, parse_bytes_with_envelope, parse_file};
pub use types::error::{PropbagError, Result};
pub use types::models;
