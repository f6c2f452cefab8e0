//! Raw content lines.

use super::parameter::{Parameters, VCardParameter};

/// A content line before value interpretation.
///
/// `[group.]name[;param]*:value`. All parts keep the case they were written
/// in. The value is the raw text after the first unquoted colon; it has not
/// been unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property group (e.g., "item1" in "item1.TEL").
    pub group: Option<String>,
    /// Property name.
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Parameters,
    /// Raw value string.
    pub value: String,
}

impl ContentLine {
    /// Creates a line with no group and no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into(),
            params: Parameters::new(),
            value: value.into(),
        }
    }

    /// Sets the group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, param: VCardParameter) -> Self {
        self.params.push(param);
        self
    }

    /// Returns whether the property is called `name` (case-insensitive).
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Property names the reader and writer treat specially.
pub mod names {
    pub const BEGIN: &str = "BEGIN";
    pub const END: &str = "END";
    pub const VERSION: &str = "VERSION";
}
