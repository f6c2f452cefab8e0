//! vCard text escaping and value joining.
//!
//! The inverse of [`crate::rfc::vcard::parse::unescape`] and of the value
//! splitters such as [`crate::rfc::vcard::parse::split_structured`].

use crate::rfc::vcard::core::VCardVersion;

/// Escapes a text value for vCard serialization.
///
/// Escapes backslash, comma and semicolon. `\r\n`, `\n` and `\r` all become
/// `\n`.
#[must_use]
pub fn escape_value(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            ',' => result.push_str("\\,"),
            ';' => result.push_str("\\;"),
            '\r' => {
                chars.next_if_eq(&'\n');
                result.push_str("\\n");
            }
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }

    result
}

/// Escapes a parameter value for `version`.
///
/// - 2.1: backslash-escapes `\` and `;`, newlines become `\n`. Commas are
///   data and a `:` cannot be written (the writer rejects it).
/// - 3.0 and 4.0 with `caret_encoding`: RFC 6868 (`^^`, `^n`, `^'`).
/// - 3.0 and 4.0 without it: backslash escapes (`\\`, `\n`, `\"`).
///
/// In 3.0 and 4.0 the result is wrapped in quotes when it contains `,`, `;`
/// or `:`.
#[must_use]
pub fn escape_param_value(s: &str, version: VCardVersion, caret_encoding: bool) -> String {
    let dialect = version.dialect();
    let caret = caret_encoding && dialect.caret_decoding_eligible;

    let mut result = String::with_capacity(s.len() + 2);
    let mut needs_quotes = false;
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push_str("\\\\"),
            '\r' | '\n' => {
                if c == '\r' {
                    chars.next_if_eq(&'\n');
                }
                result.push_str(if caret { "^n" } else { "\\n" });
            }
            ';' if !dialect.quoting_supported => result.push_str("\\;"),
            '^' if caret => result.push_str("^^"),
            '"' if caret => result.push_str("^'"),
            '"' if dialect.quoting_supported => result.push_str("\\\""),
            ':' | ';' | ',' if dialect.quoting_supported => {
                needs_quotes = true;
                result.push(c);
            }
            _ => result.push(c),
        }
    }

    if needs_quotes {
        format!("\"{result}\"")
    } else {
        result
    }
}

/// Joins a list value (e.g. `CATEGORIES`), escaping each item.
#[must_use]
pub fn join_list<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| escape_value(v.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Joins the components of a semi-structured value (e.g. `ORG`).
#[must_use]
pub fn join_semi_structured<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| escape_value(v.as_ref()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Joins a structured value (e.g. `N`, `ADR`): components separated by
/// `;`, each a `,`-separated list.
#[must_use]
pub fn join_structured<S: AsRef<str>>(components: &[Vec<S>]) -> String {
    components
        .iter()
        .map(|component| join_list(component))
        .collect::<Vec<_>>()
        .join(";")
}

/// Joins a multimap value (`KEY=a,b;KEY2=c`). Keys are upper-cased; a key
/// with no values is written bare.
#[must_use]
pub fn join_multimap<K: AsRef<str>, V: AsRef<str>>(entries: &[(K, Vec<V>)]) -> String {
    entries
        .iter()
        .map(|(key, values)| {
            let key = escape_value(&key.as_ref().to_ascii_uppercase());
            if values.is_empty() {
                key
            } else {
                format!("{key}={}", join_list(values))
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}
