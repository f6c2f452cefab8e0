//! vCard content-line parsing.
//!
//! ## Usage
//!
//! ```rust
//! use cardline_rfc::rfc::vcard::parse::{Event, read_str};
//!
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:3.0\r\n\
//! item1.TEL;TYPE=work,voice:+1-555-555-5555\r\n\
//! END:VCARD\r\n";
//!
//! let doc = read_str(input).unwrap();
//! let tel = doc.properties().next().unwrap();
//! assert_eq!(tel.group.as_deref(), Some("item1"));
//! assert_eq!(tel.params.values_of("type"), vec!["work", "voice"]);
//! assert!(matches!(doc.events[1], Event::Version(ref v) if v == "3.0"));
//! ```
//!
//! ## Features
//!
//! - Line unfolding (CRLF, LF or CR followed by one space or tab)
//! - Version-dependent parameter syntax (2.1 vs 3.0/4.0)
//! - Backslash and RFC 6868 caret escapes in parameter values
//! - Quoted-printable values in vCard 2.1
//! - Malformed lines reported as warnings, never as errors

mod escape;
mod lexer;
mod reader;
mod syntax;
mod unfold;
mod values;
mod warning;

pub use escape::{ParseOptions, unescape};
pub use lexer::parse_line;
pub use reader::{Document, Event, Reader, ReaderOptions, read_document, read_str};
pub use syntax::SyntaxRules;
pub use unfold::{LogicalLine, SoftBreak, Unfolder, unfold};
pub use values::{
    split_list, split_multimap, split_semi_structured, split_structured, unescape_value,
};
pub use warning::{Warning, WarningKind};
