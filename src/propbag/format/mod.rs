//! Property grammar layer.
//!
//! Built entirely on [`Cursor`](crate::propbag::cursor::Cursor); nothing in
//! here touches the filesystem.
//!
//! # Module Organization
//!
//! - [`text`]: Narrow strings and dual-encoding text values
//! - [`properties`]: The recursive key/type/payload dictionary
//! - [`header`]: The file envelope and versioned header record
//!
//! ```text
//! ┌─────────────────┐
//! │  Envelope       │ ← header::parse()
//! ├─────────────────┤
//! │  Header record  │ ← header::parse_header()
//! │  ┌───────────┐  │
//! │  │ Property  │  │ ← properties::parse_dict()
//! │  │ dictionary│  │   (recurses through structs and arrays)
//! │  └───────────┘  │
//! └─────────────────┘
//! ```

pub mod header;
pub mod properties;
pub mod text;
