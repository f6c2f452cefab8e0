//! Parameter unescaping.
//!
//! Two escape dialects share one state machine: backslash escapes (all
//! versions) and RFC 6868 caret escapes (3.0 and 4.0, when enabled). An
//! escape that is not recognised is kept verbatim, so bad input never
//! loses characters.

use crate::rfc::vcard::core::VCardVersion;

/// Options shared by the line parser and the unescaper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub version: VCardVersion,
    /// Decode `^^`, `^n` and `^'` in parameter values.
    pub caret_decoding: bool,
    /// What `\n` and `^n` decode to.
    pub newline: String,
}

impl ParseOptions {
    #[must_use]
    pub fn new(version: VCardVersion) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_caret_decoding(mut self, enabled: bool) -> Self {
        self.caret_decoding = enabled;
        self
    }

    #[must_use]
    pub fn with_newline(mut self, newline: impl Into<String>) -> Self {
        self.newline = newline.into();
        self
    }

    pub(crate) const fn caret_active(&self) -> bool {
        self.caret_decoding && self.version.dialect().caret_decoding_eligible
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            version: VCardVersion::default(),
            caret_decoding: true,
            newline: "\n".to_string(),
        }
    }
}

/// The escape character waiting for its successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum EscapeState {
    #[default]
    None,
    Backslash,
    Caret,
}

impl EscapeState {
    /// Returns the state entered when `c` is read outside an escape.
    pub(crate) const fn begin(c: char, options: &ParseOptions) -> Self {
        match c {
            '\\' => Self::Backslash,
            '^' if options.caret_active() => Self::Caret,
            _ => Self::None,
        }
    }

    /// Completes a pending escape with the character that follows it.
    pub(crate) fn resolve(self, c: char, options: &ParseOptions, out: &mut String) {
        let dialect = options.version.dialect();
        match (self, c) {
            (Self::None, _) => out.push(c),

            (Self::Backslash, '\\') => out.push('\\'),
            (Self::Backslash, 'n' | 'N') | (Self::Caret, 'n') => out.push_str(&options.newline),
            (Self::Backslash, '"') if dialect.quoting_supported => out.push('"'),
            (Self::Backslash, ';') if dialect.semicolon_escapable_in_params => out.push(';'),

            (Self::Caret, '^') => out.push('^'),
            (Self::Caret, '\'') => out.push('"'),

            (pending, _) => {
                pending.flush(out);
                out.push(c);
            }
        }
    }

    /// Writes a pending escape character that has no successor.
    pub(crate) fn flush(self, out: &mut String) {
        match self {
            Self::None => {}
            Self::Backslash => out.push('\\'),
            Self::Caret => out.push('^'),
        }
    }
}

/// Unescapes a parameter value written under `options.version`.
#[must_use]
pub fn unescape(value: &str, options: &ParseOptions) -> String {
    let mut result = String::with_capacity(value.len());
    let mut state = EscapeState::None;

    for c in value.chars() {
        if state == EscapeState::None {
            state = EscapeState::begin(c, options);
            if state == EscapeState::None {
                result.push(c);
            }
        } else {
            state.resolve(c, options, &mut result);
            state = EscapeState::None;
        }
    }
    state.flush(&mut result);

    result
}
