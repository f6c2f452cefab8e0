//! vCard versions and the lexical rules that differ between them.

use crate::error::{RfcError, RfcResult};

/// vCard version.
///
/// Ordered oldest first; 2.1 is the only version with the "old" syntax
/// (no quoting, nameless parameters, quoted-printable values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VCardVersion {
    /// vCard 2.1 (versit consortium).
    V2_1,
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4,
}

impl VCardVersion {
    /// Parses from version string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "2.1" => Some(Self::V2_1),
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the version string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V2_1 => "2.1",
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }

    /// Returns the lexical rules of this version.
    #[must_use]
    pub const fn dialect(self) -> Dialect {
        match self {
            Self::V2_1 => Dialect::OLD,
            Self::V3 | Self::V4 => Dialect::NEW,
        }
    }
}

impl std::fmt::Display for VCardVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VCardVersion {
    type Err = RfcError;

    fn from_str(s: &str) -> RfcResult<Self> {
        Self::parse(s).ok_or_else(|| RfcError::UnknownVersion(s.to_string()))
    }
}

/// Version-dependent lexical rules.
///
/// Every place the engine behaves differently per version asks this table
/// instead of matching on [`VCardVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag is an independent lexical rule of the version"
)]
pub struct Dialect {
    /// `,` separates the values of a multi-valued parameter.
    pub comma_separates_values: bool,
    /// `"` quotes a parameter value.
    pub quoting_supported: bool,
    /// `^` escapes (RFC 6868) may be decoded.
    pub caret_decoding_eligible: bool,
    /// `\;` inside a parameter value stands for a literal `;`.
    pub semicolon_escapable_in_params: bool,
    /// A parameter may appear without a name (`TEL;WORK:...`).
    pub nameless_params_allowed: bool,
    /// Values may be transported as quoted-printable.
    pub quoted_printable_supported: bool,
    /// Whitespace around `=` in a parameter is insignificant.
    pub trims_param_whitespace: bool,
}

impl Dialect {
    /// vCard 2.1 rules.
    pub const OLD: Self = Self {
        comma_separates_values: false,
        quoting_supported: false,
        caret_decoding_eligible: false,
        semicolon_escapable_in_params: true,
        nameless_params_allowed: true,
        quoted_printable_supported: true,
        trims_param_whitespace: true,
    };

    /// vCard 3.0 and 4.0 rules.
    pub const NEW: Self = Self {
        comma_separates_values: true,
        quoting_supported: true,
        caret_decoding_eligible: true,
        semicolon_escapable_in_params: false,
        nameless_params_allowed: false,
        quoted_printable_supported: false,
        trims_param_whitespace: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_strings() {
        assert_eq!(VCardVersion::parse("2.1"), Some(VCardVersion::V2_1));
        assert_eq!(VCardVersion::parse(" 3.0 "), Some(VCardVersion::V3));
        assert_eq!(VCardVersion::parse("4.0"), Some(VCardVersion::V4));
        assert_eq!(VCardVersion::parse("5.0"), None);
        assert_eq!(VCardVersion::V2_1.to_string(), "2.1");
    }

    #[test]
    fn versions_are_ordered() {
        assert!(VCardVersion::V2_1 < VCardVersion::V3);
        assert!(VCardVersion::V3 < VCardVersion::V4);
    }

    #[test]
    fn from_str_reports_unknown_version() {
        let err = "1.0".parse::<VCardVersion>().unwrap_err();
        assert!(matches!(err, RfcError::UnknownVersion(v) if v == "1.0"));
    }

    #[test]
    fn dialect_table() {
        let old = VCardVersion::V2_1.dialect();
        assert!(!old.comma_separates_values);
        assert!(!old.quoting_supported);
        assert!(old.semicolon_escapable_in_params);
        assert!(old.quoted_printable_supported);

        assert_eq!(VCardVersion::V3.dialect(), VCardVersion::V4.dialect());
        let new = VCardVersion::V4.dialect();
        assert!(new.comma_separates_values);
        assert!(new.caret_decoding_eligible);
        assert!(!new.nameless_params_allowed);
    }
}
