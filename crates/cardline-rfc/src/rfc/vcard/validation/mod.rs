//! Character rules for the parts of a content line.
//!
//! The writer checks every line against these rules before emitting it, so
//! that a bad name or an unescaped delimiter cannot corrupt the output.
//! vCard 2.1 is lenient about names; 3.0 and 4.0 only allow letters,
//! digits and `-`.

use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::core::VCardVersion;

/// Characters that may never appear in a 2.1 name.
const OLD_NAME_FORBIDDEN: &[char] = &['.', ';', ':', '[', ']', '=', ','];

fn is_name_char(c: char, version: VCardVersion) -> bool {
    if version.dialect().quoting_supported {
        c.is_ascii_alphanumeric() || c == '-'
    } else {
        c.is_ascii_graphic() && !OLD_NAME_FORBIDDEN.contains(&c)
    }
}

fn check_name(kind: &str, name: &str, version: VCardVersion) -> RfcResult<()> {
    if name.is_empty() {
        return Err(RfcError::InvalidLine(format!("empty {kind}")));
    }
    if let Some(bad) = name.chars().find(|&c| !is_name_char(c, version)) {
        return Err(RfcError::InvalidLine(format!(
            "{kind} {name:?} contains {bad:?}, not allowed in vCard {version}"
        )));
    }
    Ok(())
}

/// ## Errors
/// Returns [`RfcError::InvalidLine`] if the group is empty or has a character
/// the version does not allow.
pub fn validate_group(group: &str, version: VCardVersion) -> RfcResult<()> {
    check_name("group", group, version)
}

/// ## Errors
/// Returns [`RfcError::InvalidLine`] if the name is empty or has a character
/// the version does not allow.
pub fn validate_property_name(name: &str, version: VCardVersion) -> RfcResult<()> {
    check_name("property name", name, version)
}

/// ## Errors
/// Returns [`RfcError::InvalidLine`] if the name is empty or has a character
/// the version does not allow.
pub fn validate_param_name(name: &str, version: VCardVersion) -> RfcResult<()> {
    check_name("parameter name", name, version)
}

/// Checks an already escaped parameter value.
///
/// Line breaks are never allowed. In 2.1, `;` must be backslash-escaped and
/// `:` cannot be written at all. In 3.0 and 4.0, `,`, `;` and `:` need the
/// value to be quoted, and a `"` inside must be escaped.
///
/// ## Errors
/// Returns [`RfcError::InvalidLine`] naming the first offending character.
pub fn validate_param_value(value: &str, version: VCardVersion) -> RfcResult<()> {
    let dialect = version.dialect();
    let (body, quoted) = match value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) if dialect.quoting_supported => (inner, true),
        _ => (value, false),
    };

    let mut escaped = false;
    for c in body.chars() {
        if escaped {
            escaped = false;
            if matches!(c, '\r' | '\n') {
                return Err(invalid_value(value, c));
            }
            continue;
        }
        let allowed = match c {
            '\\' => {
                escaped = true;
                true
            }
            '\r' | '\n' => false,
            ':' => quoted,
            ';' => quoted,
            ',' => quoted || !dialect.comma_separates_values,
            '"' => !dialect.quoting_supported,
            _ => true,
        };
        if !allowed {
            return Err(invalid_value(value, c));
        }
    }
    Ok(())
}

fn invalid_value(value: &str, c: char) -> RfcError {
    RfcError::InvalidLine(format!("parameter value {value:?} contains unescaped {c:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_syntax_names() {
        assert!(validate_property_name("X-CUSTOM-1", VCardVersion::V4).is_ok());
        assert!(validate_property_name("", VCardVersion::V4).is_err());
        assert!(validate_property_name("X_CUSTOM", VCardVersion::V3).is_err());
        assert!(validate_group("item1", VCardVersion::V4).is_ok());
        assert!(validate_group("item.1", VCardVersion::V4).is_err());
    }

    #[test]
    fn old_syntax_names_are_lenient() {
        assert!(validate_property_name("X_CUSTOM", VCardVersion::V2_1).is_ok());
        assert!(validate_property_name("X CUSTOM", VCardVersion::V2_1).is_err());
        assert!(validate_param_name("TYPE=", VCardVersion::V2_1).is_err());
    }

    #[test]
    fn param_values_new_syntax() {
        assert!(validate_param_value("work", VCardVersion::V4).is_ok());
        assert!(validate_param_value("a;b", VCardVersion::V4).is_err());
        assert!(validate_param_value("\"a;b:c,d\"", VCardVersion::V4).is_ok());
        assert!(validate_param_value("\"a\"b\"", VCardVersion::V4).is_err());
        assert!(validate_param_value(r#""a\"b""#, VCardVersion::V4).is_ok());
        assert!(validate_param_value("a,b", VCardVersion::V3).is_err());
    }

    #[test]
    fn param_values_old_syntax() {
        assert!(validate_param_value("a,b", VCardVersion::V2_1).is_ok());
        assert!(validate_param_value(r"a\;b", VCardVersion::V2_1).is_ok());
        assert!(validate_param_value("a;b", VCardVersion::V2_1).is_err());
        assert!(validate_param_value("a:b", VCardVersion::V2_1).is_err());
        assert!(validate_param_value("\"a;b\"", VCardVersion::V2_1).is_err());
    }

    #[test]
    fn line_breaks_are_rejected() {
        for version in [VCardVersion::V2_1, VCardVersion::V3, VCardVersion::V4] {
            assert!(validate_param_value("a\nb", version).is_err());
            assert!(validate_param_value("a\\\r", version).is_err());
        }
    }
}
