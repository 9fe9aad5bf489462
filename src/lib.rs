//! Streams large XML documents into newline-delimited JSON.
//!
//! Every occurrence of a caller-named *target element* becomes one JSON
//! object on its own line; everything outside a target occurrence is read
//! and discarded without being buffered. Working memory is bounded by the
//! size of the largest target subtree, not by the size of the document —
//! the crate is built for multi-gigabyte inputs where the individual
//! records are small.
//!
//! It uses [quick-xml](https://crates.io/crates/quick-xml) as the
//! underlying tokenizer, pulling events one at a time rather than building
//! a DOM.
//!
//! # Usage
//!
//! ```rust
//! use xml_to_ndjson::Config;
//!
//! let xml = r#"<catalog><book id="1"><title>Hi</title></book></catalog>"#;
//! let ndjson = xml_to_ndjson::parse_string_to_string(xml, &Config::new("book")).unwrap();
//! assert_eq!(ndjson, "{\"@id\":\"1\",\"title\":[\"Hi\"]}\n");
//! ```

#![forbid(unsafe_code)]

mod api;
mod assembler;
mod driver;
mod error;
mod sink;
mod source;
mod value;
mod xml;

pub use api::{parse_file_to_file, parse_file_to_string, parse_string_to_file, parse_string_to_string, Config};
pub use error::{Error, Result};
