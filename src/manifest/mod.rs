//! Manifest loading
//!
//! Reads `MANIFEST.MF`-style files: one attribute per line, `Name: value`.
//!
//! # Example Manifest
//!
//! ```text
//! Archive-Manifest-Version: 1.5
//! Application-Name: Example
//! Package-Version: 1.0.0
//! Entry-Point-User-Actions: bb.action.OPEN
//! Entry-Point-User-Actions: bb.action.SHARE
//! ```
//!
//! Lines without a colon, with an unrecognized name, or with an empty value
//! are ignored. Repeated names accumulate values in file order.

mod parser;

pub use parser::{
    load_file, load_lines, load_reader, load_str, parse_line, split_line, ManifestLoader,
    ParsedLine, SkipReason,
};
