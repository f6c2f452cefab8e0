//! Streaming document reader.
//!
//! Drives the unfolder and the line parser over a byte source and turns
//! the lines into [`Event`]s. Component nesting is tracked so that a
//! `VERSION` property can switch the syntax for the rest of its component.
//! Bad lines are skipped and reported as [`Warning`]s.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::iter::Peekable;

use cardline_core::config::ReadConfig;
use encoding_rs::Encoding;

use super::escape::ParseOptions;
use super::lexer::parse_line;
use super::syntax::SyntaxRules;
use super::unfold::{LogicalLine, SoftBreak, Unfolder};
use super::warning::{Warning, WarningKind};
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::codec::{QuotedPrintable, resolve_charset};
use crate::rfc::vcard::core::{ContentLine, VCardVersion, names, param_names};

/// Reader settings.
#[derive(Debug, Clone)]
pub struct ReaderOptions {
    pub syntax: SyntaxRules,
    pub caret_decoding: bool,
    /// What `\n` and `^n` in parameter values decode to.
    pub newline: String,
    /// Encoding of the input, also the fallback for unknown `CHARSET`s.
    pub encoding: &'static Encoding,
}

impl ReaderOptions {
    /// ## Summary
    /// Builds reader options from the `[read]` configuration section.
    ///
    /// ## Errors
    /// Returns an error if the default version is unknown, or if the charset
    /// is unknown or not ASCII-compatible (the unfolder scans raw bytes for
    /// line breaks, spaces and `=`).
    pub fn from_config(config: &ReadConfig) -> RfcResult<Self> {
        config.validate()?;
        let version: VCardVersion = config.default_version.parse()?;
        let encoding = resolve_charset(&config.charset)
            .ok()
            .filter(|encoding| encoding.is_ascii_compatible())
            .ok_or_else(|| RfcError::UnsupportedCharset(config.charset.clone()))?;
        Ok(Self {
            syntax: SyntaxRules::vcard_with_default(version),
            caret_decoding: config.caret_decoding,
            newline: config.newline.as_str().to_string(),
            encoding,
        })
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            syntax: SyntaxRules::default(),
            caret_decoding: true,
            newline: "\n".to_string(),
            encoding: encoding_rs::UTF_8,
        }
    }
}

/// Something the reader found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `BEGIN:name`.
    BeginComponent(String),
    /// `END:name`, once per component closed.
    EndComponent(String),
    /// A `VERSION` property that selected a version.
    Version(String),
    /// Any other property.
    Property(ContentLine),
}

#[derive(Debug)]
struct Frame {
    name: String,
    /// Version in force when the component began.
    version: VCardVersion,
}

/// Pull-based reader over one byte source.
///
/// The reader owns its source; iterate it to read the document. I/O errors
/// end up as `Err` items, malformed content as [`Reader::warnings`].
pub struct Reader<R: BufRead> {
    lines: Peekable<Unfolder<R>>,
    syntax: SyntaxRules,
    parse_options: ParseOptions,
    fallback_encoding: &'static Encoding,
    stack: Vec<Frame>,
    queued: VecDeque<Event>,
    warnings: Vec<Warning>,
}

impl<R: BufRead> Reader<R> {
    #[must_use]
    pub fn new(source: R, options: ReaderOptions) -> Self {
        let version = options.syntax.default_version();
        Self {
            lines: Unfolder::with_encoding(source, options.encoding).peekable(),
            parse_options: ParseOptions {
                version,
                caret_decoding: options.caret_decoding,
                newline: options.newline,
            },
            syntax: options.syntax,
            fallback_encoding: options.encoding,
            stack: Vec::new(),
            queued: VecDeque::new(),
            warnings: Vec::new(),
        }
    }

    /// The version currently used to parse lines.
    #[must_use]
    pub const fn version(&self) -> VCardVersion {
        self.parse_options.version
    }

    /// Names of the open components, outermost first.
    pub fn open_components(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|frame| frame.name.as_str())
    }

    /// Warnings collected so far.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Takes the warnings collected so far.
    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn warn(&mut self, kind: WarningKind, line: &LogicalLine) {
        tracing::warn!(line = line.number, kind = %kind, text = %line.text, "Skipped or repaired line");
        self.warnings.push(Warning::new(kind, line.number, &line.text));
    }

    fn set_version(&mut self, version: VCardVersion) {
        if self.parse_options.version != version {
            tracing::debug!(from = %self.parse_options.version, to = %version, "Switching version");
        }
        self.parse_options.version = version;
    }

    fn next_event(&mut self) -> io::Result<Option<Event>> {
        if let Some(event) = self.queued.pop_front() {
            return Ok(Some(event));
        }

        while let Some(logical) = self.lines.next().transpose()? {
            let Some(line) = parse_line(&logical.text, &self.parse_options) else {
                self.warn(WarningKind::MalformedLine, &logical);
                continue;
            };

            if line.is_named(names::BEGIN) {
                if let Some(event) = self.begin(&line, &logical) {
                    return Ok(Some(event));
                }
                continue;
            }

            if line.is_named(names::END) {
                self.end(&line, &logical);
                if let Some(event) = self.queued.pop_front() {
                    return Ok(Some(event));
                }
                continue;
            }

            if line.is_named(names::VERSION) {
                if let Some(event) = self.version_line(line, &logical) {
                    return Ok(Some(event));
                }
                continue;
            }

            let line = self.decode_transport(line, &logical);
            return Ok(Some(Event::Property(line)));
        }

        Ok(None)
    }

    fn begin(&mut self, line: &ContentLine, logical: &LogicalLine) -> Option<Event> {
        let name = line.value.trim();
        if name.is_empty() {
            self.warn(WarningKind::EmptyBegin, logical);
            return None;
        }

        self.stack.push(Frame {
            name: name.to_string(),
            version: self.parse_options.version,
        });
        Some(Event::BeginComponent(name.to_string()))
    }

    fn end(&mut self, line: &ContentLine, logical: &LogicalLine) {
        let name = line.value.trim();
        if name.is_empty() {
            self.warn(WarningKind::EmptyEnd, logical);
            return;
        }

        let Some(index) = self
            .stack
            .iter()
            .rposition(|frame| frame.name.eq_ignore_ascii_case(name))
        else {
            self.warn(WarningKind::UnmatchedEnd, logical);
            return;
        };

        let mut restored = self.parse_options.version;
        while self.stack.len() > index {
            if let Some(frame) = self.stack.pop() {
                restored = frame.version;
                self.queued.push_back(Event::EndComponent(frame.name));
            }
        }
        self.set_version(restored);
    }

    fn version_line(&mut self, line: ContentLine, logical: &LogicalLine) -> Option<Event> {
        let Some(component) = self.stack.last().map(|frame| frame.name.clone()) else {
            return Some(Event::Property(line));
        };
        if !self.syntax.has_component(&component) {
            return Some(Event::Property(line));
        }

        match self.syntax.version_for(&component, &line.value) {
            Some(version) => {
                self.set_version(version);
                Some(Event::Version(line.value.trim().to_string()))
            }
            None => {
                self.warn(WarningKind::UnknownVersion, logical);
                Some(Event::Property(line))
            }
        }
    }

    /// Decodes a quoted-printable value, joining `=`-continued lines first.
    ///
    /// Folds that followed an `=` inside the value are soft breaks: the `=`
    /// goes and the whitespace the unfolder removed comes back.
    fn decode_transport(&mut self, mut line: ContentLine, logical: &LogicalLine) -> ContentLine {
        if !self.parse_options.version.dialect().quoted_printable_supported
            || !line.params.is_quoted_printable()
        {
            return line;
        }

        if !logical.soft_breaks.is_empty() {
            let skipped = logical
                .text
                .strip_suffix(line.value.as_str())
                .map_or(0, |head| head.matches('=').count());
            line.value = restore_soft_breaks(&line.value, skipped, &logical.soft_breaks);
        }

        while line.value.ends_with('=') {
            if !matches!(self.lines.peek(), Some(Ok(_))) {
                break;
            }
            let Some(Ok(next)) = self.lines.next() else {
                break;
            };
            line.value.pop();
            line.value.push_str(&restore_soft_breaks(&next.text, 0, &next.soft_breaks));
        }

        let codec = match line.params.charset() {
            Some(label) => QuotedPrintable::new(label).unwrap_or_else(|_| {
                let kind = WarningKind::UnknownCharset(label.to_string());
                self.warn(kind, logical);
                QuotedPrintable::with_encoding(self.fallback_encoding)
            }),
            None => QuotedPrintable::with_encoding(self.fallback_encoding),
        };

        match codec.decode(&line.value) {
            Ok(decoded) => {
                line.value = decoded;
                line.params.remove_quoted_printable();
                line.params.remove(param_names::CHARSET);
            }
            Err(err) => {
                tracing::debug!(error = %err, "Keeping raw quoted-printable value");
                self.warn(WarningKind::QuotedPrintableError, logical);
            }
        }
        line
    }
}

/// Rewrites the `=` of each soft break in `value` as the removed indent.
///
/// `skipped` is the number of `=` in the logical line before `value`.
fn restore_soft_breaks(value: &str, skipped: usize, breaks: &[SoftBreak]) -> String {
    let mut result = String::with_capacity(value.len());
    let mut ordinal = skipped;
    for c in value.chars() {
        if c != '=' {
            result.push(c);
            continue;
        }
        match breaks.iter().find(|soft| soft.equals == ordinal) {
            Some(soft) => result.push(soft.indent),
            None => result.push(c),
        }
        ordinal += 1;
    }
    result
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = io::Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}

/// A fully read document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub events: Vec<Event>,
    pub warnings: Vec<Warning>,
}

impl Document {
    /// The property lines, in order, without component boundaries.
    pub fn properties(&self) -> impl Iterator<Item = &ContentLine> {
        self.events.iter().filter_map(|event| match event {
            Event::Property(line) => Some(line),
            _ => None,
        })
    }
}

/// ## Summary
/// Reads a whole document, collecting events and warnings.
///
/// Malformed lines never abort the read; they are reported in
/// [`Document::warnings`].
///
/// ## Errors
/// Returns an error only if reading from the source fails.
#[tracing::instrument(skip(source, options))]
pub fn read_document<R: BufRead>(source: R, options: ReaderOptions) -> RfcResult<Document> {
    tracing::debug!("Reading document");

    let mut reader = Reader::new(source, options);
    let mut events = Vec::new();
    for event in &mut reader {
        events.push(event?);
    }
    let warnings = reader.take_warnings();

    tracing::debug!(
        events = events.len(),
        warnings = warnings.len(),
        "Read document"
    );
    Ok(Document { events, warnings })
}

/// Reads a document held in memory with default options.
///
/// ## Errors
/// Never fails for in-memory input; the signature matches [`read_document`].
pub fn read_str(input: &str) -> RfcResult<Document> {
    read_document(input.as_bytes(), ReaderOptions::default())
}
