//! Content line tokenizer.
//!
//! Splits one unfolded line into group, name, parameters and raw value in a
//! single pass. Parameter tokens are unescaped on the fly; the value is
//! handed back untouched.

use super::escape::{EscapeState, ParseOptions};
use crate::rfc::vcard::core::{ContentLine, Parameters, VCardParameter};

/// Parses a single content line.
///
/// Format: `[group.]name[;param]*:value`
///
/// Returns `None` if the line has no property name or no `:`. An empty
/// value (`NOTE:`) is a valid line with an empty value.
#[must_use]
pub fn parse_line(line: &str, options: &ParseOptions) -> Option<ContentLine> {
    let dialect = options.version.dialect();

    let mut group: Option<String> = None;
    let mut name: Option<String> = None;
    let mut params = Parameters::new();
    let mut param = OpenParameter::default();

    let mut buffer = String::new();
    let mut escape = EscapeState::None;
    let mut in_quotes = false;

    for (i, c) in line.char_indices() {
        if escape != EscapeState::None {
            escape.resolve(c, options, &mut buffer);
            escape = EscapeState::None;
            continue;
        }

        escape = EscapeState::begin(c, options);
        if escape != EscapeState::None {
            continue;
        }

        match c {
            '.' if group.is_none() && name.is_none() => {
                group = Some(std::mem::take(&mut buffer));
            }
            ';' | ':' if !in_quotes => {
                let token = std::mem::take(&mut buffer);
                if name.is_none() {
                    name = Some(token);
                } else if let Some(closed) = param.close(token, dialect.trims_param_whitespace) {
                    params.push(closed);
                }

                if c == ':' {
                    let name = name.filter(|n| !n.is_empty())?;
                    return Some(ContentLine {
                        group,
                        name,
                        params,
                        value: line[i + 1..].to_string(),
                    });
                }
            }
            ',' if !in_quotes && dialect.comma_separates_values && name.is_some() => {
                param.values.push(std::mem::take(&mut buffer));
            }
            '=' if name.is_some() && param.name.is_none() => {
                let mut param_name = std::mem::take(&mut buffer);
                if dialect.trims_param_whitespace {
                    param_name.truncate(param_name.trim_end().len());
                }
                param.name = Some(param_name);
            }
            '"' if dialect.quoting_supported && name.is_some() => in_quotes = !in_quotes,
            _ => buffer.push(c),
        }
    }

    tracing::trace!(line, "Line has no value separator");
    None
}

/// The parameter currently being scanned.
#[derive(Debug, Default)]
struct OpenParameter {
    name: Option<String>,
    values: Vec<String>,
}

impl OpenParameter {
    /// Closes the parameter with its last token and resets the slot.
    ///
    /// A nameless parameter with nothing in it (`TEL;;WORK:`) is dropped.
    fn close(&mut self, token: String, trim: bool) -> Option<VCardParameter> {
        let Self { name, mut values } = std::mem::take(self);
        values.push(token);

        if trim {
            for value in &mut values {
                *value = match name {
                    Some(_) => value.trim_start().to_string(),
                    None => value.trim().to_string(),
                };
            }
        }

        match name {
            Some(name) => Some(VCardParameter::multi(name, values)),
            None if values.iter().all(String::is_empty) => None,
            None => Some(VCardParameter {
                name: None,
                values,
            }),
        }
    }
}
