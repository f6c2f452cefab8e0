//! Transport codecs.

mod quoted_printable;

pub use quoted_printable::{QuotedPrintable, is_printable, resolve_charset};
