//! Line folding.
//!
//! Output goes through a [`FoldedWriter`], which counts characters since the
//! last line break and inserts a fold (terminator plus indent) before the
//! character that would exceed the profile's width. Quoted-printable text
//! is folded the same way, except that an `=XX` triplet is never split.

use std::io::{BufWriter, IntoInnerError, Write};

use cardline_core::config::{FoldPreset, NewlineStyle};
use cardline_core::constants::{
    CRLF, FOLD_INDENT, MIME_LINE_LENGTH, QUOTED_PRINTABLE_LINE_LENGTH, WIRE_LINE_LENGTH,
};

use crate::error::{RfcError, RfcResult};

/// Bytes buffered before they are pushed to the sink.
const BUFFER_CAPACITY: usize = 8 * 1024;

/// How output lines are folded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldProfile {
    /// Characters per physical line, or `None` to never fold.
    max_line_length: Option<usize>,
    /// Written at the start of each continuation line.
    indent: String,
    /// Line terminator used for folds.
    newline: String,
}

impl FoldProfile {
    /// Creates a custom profile.
    ///
    /// ## Errors
    /// Returns [`RfcError::InvalidFoldProfile`] if the indent is empty or not
    /// made of spaces and tabs, if the newline is empty, or if the width
    /// leaves no room after the indent.
    pub fn new(
        max_line_length: Option<usize>,
        indent: impl Into<String>,
        newline: impl Into<String>,
    ) -> RfcResult<Self> {
        let indent = indent.into();
        let newline = newline.into();

        if indent.is_empty() || !indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(RfcError::InvalidFoldProfile(format!(
                "indent must be spaces or tabs, got {indent:?}"
            )));
        }
        if newline.is_empty() || !newline.chars().all(|c| c == '\r' || c == '\n') {
            return Err(RfcError::InvalidFoldProfile(format!(
                "newline must be a line terminator, got {newline:?}"
            )));
        }
        if let Some(width) = max_line_length
            && width <= indent.chars().count()
        {
            return Err(RfcError::InvalidFoldProfile(format!(
                "width {width} leaves no room after a {}-character indent",
                indent.chars().count()
            )));
        }

        Ok(Self {
            max_line_length,
            indent,
            newline,
        })
    }

    /// 75 columns, one-space indent, CRLF. The RFC 6350 wire format.
    #[must_use]
    pub fn wire() -> Self {
        Self::preset(Some(WIRE_LINE_LENGTH), CRLF)
    }

    /// 76 columns, the quoted-printable soft limit from RFC 2045.
    #[must_use]
    pub fn quoted_printable() -> Self {
        Self::preset(Some(QUOTED_PRINTABLE_LINE_LENGTH), CRLF)
    }

    /// 72 columns, for output embedded in mail bodies.
    #[must_use]
    pub fn mime() -> Self {
        Self::preset(Some(MIME_LINE_LENGTH), CRLF)
    }

    /// Never folds.
    #[must_use]
    pub fn unfolded() -> Self {
        Self::preset(None, CRLF)
    }

    /// Builds a preset with the given terminator.
    #[must_use]
    pub fn from_preset(preset: FoldPreset, newline: NewlineStyle) -> Self {
        let width = match preset {
            FoldPreset::Wire => Some(WIRE_LINE_LENGTH),
            FoldPreset::QuotedPrintable => Some(QUOTED_PRINTABLE_LINE_LENGTH),
            FoldPreset::Mime => Some(MIME_LINE_LENGTH),
            FoldPreset::Unfolded => None,
        };
        Self::preset(width, newline.as_str())
    }

    fn preset(max_line_length: Option<usize>, newline: &str) -> Self {
        Self {
            max_line_length,
            indent: FOLD_INDENT.to_string(),
            newline: newline.to_string(),
        }
    }

    #[must_use]
    pub const fn max_line_length(&self) -> Option<usize> {
        self.max_line_length
    }

    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    #[must_use]
    pub fn newline(&self) -> &str {
        &self.newline
    }
}

impl Default for FoldProfile {
    fn default() -> Self {
        Self::wire()
    }
}

/// A sink that folds what is written to it.
///
/// The column count carries over between calls, so a line can be written
/// in pieces. Output is buffered; call [`FoldedWriter::finish`] to flush and
/// get the sink back. Dropping the writer flushes on a best-effort basis.
#[derive(Debug)]
pub struct FoldedWriter<W: Write> {
    inner: BufWriter<W>,
    profile: FoldProfile,
    /// Characters since the last line break, indent included.
    column: usize,
    /// Nothing but the indent has been written since the last break.
    fresh_line: bool,
}

impl<W: Write> FoldedWriter<W> {
    #[must_use]
    pub fn new(inner: W, profile: FoldProfile) -> Self {
        Self {
            inner: BufWriter::with_capacity(BUFFER_CAPACITY, inner),
            profile,
            column: 0,
            fresh_line: true,
        }
    }

    #[must_use]
    pub const fn profile(&self) -> &FoldProfile {
        &self.profile
    }

    /// Writes text, folding as needed.
    ///
    /// `\r` and `\n` in the text are written through and restart the count.
    ///
    /// ## Errors
    /// Returns [`RfcError::Io`] if the sink fails.
    pub fn write_str(&mut self, text: &str) -> RfcResult<()> {
        let mut buf = [0; 4];
        for c in text.chars() {
            let unit = c.encode_utf8(&mut buf);
            if matches!(c, '\r' | '\n') {
                self.inner.write_all(unit.as_bytes())?;
                self.column = 0;
                self.fresh_line = true;
                continue;
            }
            self.push_unit(unit, 1)?;
        }
        Ok(())
    }

    /// Writes quoted-printable text, folding between encoded units only.
    ///
    /// The text must already be encoded. Folds never fall inside an `=XX`
    /// triplet; no soft line break is added.
    ///
    /// ## Errors
    /// Returns [`RfcError::Io`] if the sink fails.
    pub fn write_quoted_printable(&mut self, encoded: &str) -> RfcResult<()> {
        let mut rest = encoded;
        while let Some(c) = rest.chars().next() {
            let len = if c == '=' {
                rest.char_indices().nth(3).map_or(rest.len(), |(i, _)| i)
            } else {
                c.len_utf8()
            };
            let (unit, tail) = rest.split_at(len);
            self.push_unit(unit, unit.chars().count())?;
            rest = tail;
        }
        Ok(())
    }

    /// Ends the current logical line with the profile's terminator.
    ///
    /// ## Errors
    /// Returns [`RfcError::Io`] if the sink fails.
    pub fn end_line(&mut self) -> RfcResult<()> {
        self.inner.write_all(self.profile.newline.as_bytes())?;
        self.column = 0;
        self.fresh_line = true;
        Ok(())
    }

    /// Flushes the buffer and returns the sink.
    ///
    /// ## Errors
    /// Returns [`RfcError::Io`] if the sink fails.
    pub fn finish(self) -> RfcResult<W> {
        let mut inner = self.inner.into_inner().map_err(IntoInnerError::into_error)?;
        inner.flush()?;
        Ok(inner)
    }

    /// Writes one unit that must stay on one physical line.
    fn push_unit(&mut self, unit: &str, width: usize) -> RfcResult<()> {
        if let Some(max) = self.profile.max_line_length
            && !self.fresh_line
            && self.column + width > max
        {
            self.inner.write_all(self.profile.newline.as_bytes())?;
            self.inner.write_all(self.profile.indent.as_bytes())?;
            self.column = self.profile.indent.chars().count();
        }
        self.inner.write_all(unit.as_bytes())?;
        self.column += width;
        self.fresh_line = false;
        Ok(())
    }
}

/// Folds a single logical line into a string.
///
/// ## Errors
/// Never fails in practice; the sink is an in-memory buffer.
pub fn fold_line(line: &str, profile: &FoldProfile) -> RfcResult<String> {
    let mut writer = FoldedWriter::new(Vec::new(), profile.clone());
    writer.write_str(line)?;
    let bytes = writer.finish()?;
    String::from_utf8(bytes).map_err(|err| RfcError::InvalidLine(err.to_string()))
}
