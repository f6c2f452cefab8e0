//! Line unfolding.
//!
//! A line terminator (CRLF, bare LF or bare CR) followed by a single space or
//! tab is a fold: both are removed and the text continues the previous
//! logical line. Any other terminator ends the logical line.
//!
//! A fold right after an `=` may instead be a quoted-printable soft break,
//! whose leading whitespace is data. The unfolder cannot tell the two apart,
//! so it records such folds in [`LogicalLine::soft_breaks`] for the reader.

use std::io::{self, BufRead};

use encoding_rs::Encoding;

/// One unfolded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the physical line the logical line starts on.
    pub number: usize,
    pub text: String,
    /// Folds that directly followed an `=`, in order.
    pub soft_breaks: Vec<SoftBreak>,
}

/// A fold whose physical line ended in `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftBreak {
    /// 0-based ordinal of that `=` among all `=` in [`LogicalLine::text`].
    pub equals: usize,
    /// The space or tab removed by the fold.
    pub indent: char,
}

/// Pulls logical lines out of a byte source.
///
/// Each physical line is decoded on its own with the configured encoding,
/// which must be ASCII-compatible. Blank logical lines are skipped.
pub struct Unfolder<R> {
    source: R,
    encoding: &'static Encoding,
    /// Physical line (and its number) read ahead while looking for a fold.
    pending: Option<(usize, Vec<u8>)>,
    /// Number of physical lines consumed so far.
    physical: usize,
    done: bool,
}

impl<R: BufRead> Unfolder<R> {
    /// Creates an unfolder over UTF-8 input.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::with_encoding(source, encoding_rs::UTF_8)
    }

    #[must_use]
    pub fn with_encoding(source: R, encoding: &'static Encoding) -> Self {
        Self {
            source,
            encoding,
            pending: None,
            physical: 0,
            done: false,
        }
    }

    /// Returns the underlying source, dropping any read-ahead.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Reads one physical line without its terminator, with its number.
    ///
    /// Returns `None` at end of input.
    fn read_physical(&mut self) -> io::Result<Option<(usize, Vec<u8>)>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        if self.done {
            return Ok(None);
        }

        let mut line = Vec::new();
        loop {
            let buf = self.source.fill_buf()?;
            if buf.is_empty() {
                self.done = true;
                if line.is_empty() {
                    return Ok(None);
                }
                break;
            }

            if let Some(end) = buf.iter().position(|&b| b == b'\r' || b == b'\n') {
                let terminator = buf[end];
                line.extend_from_slice(&buf[..end]);
                self.source.consume(end + 1);
                if terminator == b'\r' {
                    let buf = self.source.fill_buf()?;
                    if buf.first() == Some(&b'\n') {
                        self.source.consume(1);
                    }
                }
                break;
            }

            let len = buf.len();
            line.extend_from_slice(buf);
            self.source.consume(len);
        }

        self.physical += 1;
        Ok(Some((self.physical, line)))
    }

    fn next_line(&mut self) -> io::Result<Option<LogicalLine>> {
        loop {
            let Some((number, mut bytes)) = self.read_physical()? else {
                return Ok(None);
            };

            let mut soft_breaks = Vec::new();
            while let Some((next_number, next)) = self.read_physical()? {
                match next.first() {
                    Some(&indent @ (b' ' | b'\t')) => {
                        if bytes.last() == Some(&b'=') {
                            soft_breaks.push(SoftBreak {
                                equals: count_equals(&bytes) - 1,
                                indent: char::from(indent),
                            });
                        }
                        bytes.extend_from_slice(&next[1..]);
                    }
                    _ => {
                        self.pending = Some((next_number, next));
                        break;
                    }
                }
            }

            if bytes.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let (text, malformed) = self.encoding.decode_without_bom_handling(&bytes);
            if malformed {
                tracing::warn!(line = number, "Replaced malformed byte sequences");
            }
            return Ok(Some(LogicalLine {
                number,
                text: text.into_owned(),
                soft_breaks,
            }));
        }
    }
}

/// Counts `=` bytes. The encoding is ASCII-compatible, so each one is an
/// `=` in the decoded text.
fn count_equals(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'=').count()
}

impl<R: BufRead> Iterator for Unfolder<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

/// Unfolds a whole string.
///
/// Convenience wrapper over [`Unfolder`] for in-memory input.
#[must_use]
pub fn unfold(input: &str) -> Vec<String> {
    Unfolder::new(input.as_bytes())
        .filter_map(Result::ok)
        .map(|line| line.text)
        .collect()
}
