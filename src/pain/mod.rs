//! pain.001 / pain.008 XML generation.
//!
//! Maps a [`Document`](crate::core::Document) to the element tree of its
//! format and renders it, prefixed with the XML declaration.
//!
//! # Example
//!
//! ```no_run
//! use sepa_pain::core::*;
//! use sepa_pain::pain;
//!
//! let doc = Document::new(PainFormat::Pain008_001_02);
//! // populate group header, payment infos and transactions ...
//! let xml = pain::to_xml(&doc).unwrap();
//! ```

mod assemble;
mod node;

pub use assemble::{to_xml, to_xml_tree, to_xml_with};
pub use node::{XmlNode, is_valid_xml_char, is_valid_xml_name, is_valid_xml_text};
