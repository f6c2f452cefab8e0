//! Problems the reader recovered from.

use std::fmt;

/// A recoverable problem found while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The kind of problem.
    pub kind: WarningKind,
    /// Physical line number where the logical line started (1-based).
    pub line: usize,
    /// The unfolded line, as read.
    pub text: String,
}

impl Warning {
    #[must_use]
    pub fn new(kind: WarningKind, line: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            text: text.into(),
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line, self.kind, self.text)
    }
}

/// The kind of warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningKind {
    /// The line has no property name or no `:`; it was skipped.
    MalformedLine,
    /// `BEGIN` without a component name.
    EmptyBegin,
    /// `END` without a component name.
    EmptyEnd,
    /// `END` for a component that is not open.
    UnmatchedEnd,
    /// `VERSION` value not known for the component; the version was kept.
    UnknownVersion,
    /// `CHARSET` not known; the fallback charset was used.
    UnknownCharset(String),
    /// Quoted-printable value could not be decoded; the raw value was kept.
    QuotedPrintableError,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine => write!(f, "malformed line"),
            Self::EmptyBegin => write!(f, "empty BEGIN"),
            Self::EmptyEnd => write!(f, "empty END"),
            Self::UnmatchedEnd => write!(f, "unmatched END"),
            Self::UnknownVersion => write!(f, "unknown version"),
            Self::UnknownCharset(charset) => write!(f, "unknown charset {charset}"),
            Self::QuotedPrintableError => write!(f, "quoted-printable decoding failed"),
        }
    }
}
