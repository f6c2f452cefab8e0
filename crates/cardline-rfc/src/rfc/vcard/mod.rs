//! vCard content lines (vCard 2.1, RFC 2426 and RFC 6350).
//!
//! This module reads and writes the line layer that every vCard property
//! shares. It knows about groups, parameters, folding, escaping and the
//! quoted-printable transport encoding of vCard 2.1. It does not know what
//! an `ADR` or a `BDAY` means.
//!
//! ## Usage
//!
//! ### Reading
//!
//! ```rust
//! use cardline_rfc::rfc::vcard::read_str;
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:2.1\r\n\
//! TEL;WORK;VOICE:+1-555-555-5555\r\n\
//! NOTE;ENCODING=QUOTED-PRINTABLE:caf=C3=A9\r\n\
//! END:VCARD\r\n";
//!
//! let doc = read_str(input).unwrap();
//! let props: Vec<_> = doc.properties().collect();
//! assert_eq!(props[0].params.nameless_values(), vec!["WORK", "VOICE"]);
//! assert_eq!(props[1].value, "café");
//! ```
//!
//! ### Writing
//!
//! ```rust
//! use cardline_rfc::rfc::vcard::{ContentLine, FoldProfile, LineWriter, VCardParameter, VCardVersion};
//!
//! let mut writer = LineWriter::new(Vec::new(), VCardVersion::V4, FoldProfile::wire());
//! writer.begin_component("VCARD").unwrap();
//! writer.write_version("4.0").unwrap();
//! writer
//!     .write_property(&ContentLine::new("FN", "Jane Doe").with_param(VCardParameter::type_param("work")))
//!     .unwrap();
//! writer.end_component("VCARD").unwrap();
//!
//! let output = String::from_utf8(writer.finish().unwrap()).unwrap();
//! assert!(output.contains("FN;TYPE=work:Jane Doe\r\n"));
//! ```
//!
//! ## Submodules
//!
//! - [`core`] - Line, parameter and version types
//! - [`parse`] - Unfolding, line parsing and the document reader
//! - [`build`] - Escaping, folding and the line writer
//! - [`codec`] - Quoted-printable transport encoding
//! - [`validation`] - Character rules checked before writing

pub mod build;
pub mod codec;
pub mod core;
pub mod parse;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use build::{FoldProfile, FoldedWriter, LineWriter, escape_param_value, escape_value};
pub use codec::QuotedPrintable;
pub use core::{ContentLine, Parameters, VCardParameter, VCardVersion};
pub use parse::{
    Document, Event, ParseOptions, Reader, ReaderOptions, Warning, WarningKind, parse_line,
    read_document, read_str, unescape,
};
