//! Generic value splitting for property parsers.
//!
//! These helpers know nothing about individual properties. They split a raw
//! value on unescaped delimiters and unescape each piece with the value
//! rules (`\\`, `\n`, `\,`, `\;`, `\:`).

/// Unescapes a text value.
///
/// `\n` and `\N` become `newline`; `\\`, `\,`, `\;` and `\:` become the
/// escaped character. Any other backslash sequence is kept as written.
#[must_use]
pub fn unescape_value(s: &str, newline: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push_str(newline),
            Some(escaped @ ('\\' | ',' | ';' | ':')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Splits on `delimiter` where it is not escaped by a backslash.
///
/// The pieces are returned raw.
fn split_unescaped(s: &str, delimiter: char, limit: Option<usize>) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        if c == '\\' {
            escaped = true;
            continue;
        }
        if c == delimiter {
            if limit.is_some_and(|limit| parts.len() + 1 >= limit) {
                break;
            }
            parts.push(&s[start..i]);
            start = i + c.len_utf8();
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a comma-separated list value (e.g. `CATEGORIES`).
///
/// An empty value is an empty list.
#[must_use]
pub fn split_list(value: &str, newline: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    split_unescaped(value, ',', None)
        .into_iter()
        .map(|part| unescape_value(part, newline))
        .collect()
}

/// Splits a semicolon-separated value whose components are plain text
/// (e.g. `ORG`, `GENDER`).
///
/// With a `limit`, at most that many components are produced and the last
/// one holds the rest of the value, delimiters included.
#[must_use]
pub fn split_semi_structured(value: &str, newline: &str, limit: Option<usize>) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    split_unescaped(value, ';', limit)
        .into_iter()
        .map(|part| unescape_value(part, newline))
        .collect()
}

/// Splits a structured value (e.g. `N`, `ADR`): semicolon-separated
/// components, each a comma-separated list.
///
/// An empty component is an empty list.
#[must_use]
pub fn split_structured(value: &str, newline: &str) -> Vec<Vec<String>> {
    if value.is_empty() {
        return Vec::new();
    }
    split_unescaped(value, ';', None)
        .into_iter()
        .map(|component| split_list(component, newline))
        .collect()
}

/// Splits a multimap value (`KEY=a,b;KEY2=c`, e.g. `RRULE`-style values).
///
/// Keys are upper-cased; order and duplicates are kept. A component without
/// `=` is a key with no values.
#[must_use]
pub fn split_multimap(value: &str, newline: &str) -> Vec<(String, Vec<String>)> {
    if value.is_empty() {
        return Vec::new();
    }
    split_unescaped(value, ';', None)
        .into_iter()
        .map(|component| match component.split_once('=') {
            Some((key, values)) => (
                unescape_value(key, newline).to_ascii_uppercase(),
                split_list(values, newline),
            ),
            None => (unescape_value(component, newline).to_ascii_uppercase(), Vec::new()),
        })
        .collect()
}
