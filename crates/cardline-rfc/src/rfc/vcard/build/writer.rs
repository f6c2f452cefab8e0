//! Content line writer.
//!
//! Values and parameter values handed to the writer are already escaped
//! (see [`super::escape`]). The writer checks them, assembles the line,
//! applies the quoted-printable transport where the version wants it, and
//! folds the result.

use std::borrow::Cow;
use std::io::Write;

use cardline_core::config::WriteConfig;
use cardline_core::constants::DEFAULT_CHARSET;

use super::fold::{FoldProfile, FoldedWriter};
use crate::error::{RfcError, RfcResult};
use crate::rfc::vcard::codec::QuotedPrintable;
use crate::rfc::vcard::core::{ContentLine, Parameters, VCardParameter, VCardVersion, names};
use crate::rfc::vcard::validation::{
    validate_group, validate_param_name, validate_param_value, validate_property_name,
};

/// Writes content lines for one version at a time.
#[derive(Debug)]
pub struct LineWriter<W: Write> {
    out: FoldedWriter<W>,
    version: VCardVersion,
    caret_encoding: bool,
}

impl<W: Write> LineWriter<W> {
    #[must_use]
    pub fn new(sink: W, version: VCardVersion, profile: FoldProfile) -> Self {
        Self {
            out: FoldedWriter::new(sink, profile),
            version,
            caret_encoding: false,
        }
    }

    /// Uses RFC 6868 caret escapes in [`Self::escape_param_value`].
    ///
    /// Only affects 3.0 and 4.0.
    #[must_use]
    pub const fn with_caret_encoding(mut self, enabled: bool) -> Self {
        self.caret_encoding = enabled;
        self
    }

    /// Builds a writer from the `[write]` configuration section.
    ///
    /// ## Errors
    /// Returns [`RfcError::CoreError`] if the configured version is not 2.1,
    /// 3.0 or 4.0.
    pub fn from_config(sink: W, config: &WriteConfig) -> RfcResult<Self> {
        config.validate()?;
        let version: VCardVersion = config.version.parse()?;
        let profile = FoldProfile::from_preset(config.profile, config.newline);
        Ok(Self::new(sink, version, profile).with_caret_encoding(config.caret_encoding))
    }

    #[must_use]
    pub const fn version(&self) -> VCardVersion {
        self.version
    }

    #[must_use]
    pub const fn caret_encoding(&self) -> bool {
        self.caret_encoding
    }

    /// Switches the version used for the following lines.
    pub fn set_version(&mut self, version: VCardVersion) {
        tracing::debug!(from = %self.version, to = %version, "Switching write version");
        self.version = version;
    }

    /// Escapes a parameter value with this writer's version and caret setting.
    #[must_use]
    pub fn escape_param_value(&self, value: &str) -> String {
        super::escape::escape_param_value(value, self.version, self.caret_encoding)
    }

    /// Writes `BEGIN:name`.
    ///
    /// ## Errors
    /// See [`Self::write_property`].
    pub fn begin_component(&mut self, name: &str) -> RfcResult<()> {
        self.write_property(&ContentLine::new(names::BEGIN, name))
    }

    /// Writes `END:name`.
    ///
    /// ## Errors
    /// See [`Self::write_property`].
    pub fn end_component(&mut self, name: &str) -> RfcResult<()> {
        self.write_property(&ContentLine::new(names::END, name))
    }

    /// Writes `VERSION:value` and switches to that version when it is known.
    ///
    /// The line itself is written under the current version.
    ///
    /// ## Errors
    /// See [`Self::write_property`].
    pub fn write_version(&mut self, value: &str) -> RfcResult<()> {
        self.write_property(&ContentLine::new(names::VERSION, value))?;
        match VCardVersion::parse(value) {
            Some(version) => self.set_version(version),
            None => tracing::warn!(value, "Unknown version written; keeping current rules"),
        }
        Ok(())
    }

    /// Writes one content line.
    ///
    /// ## Errors
    /// Returns [`RfcError::InvalidLine`] if a name or parameter breaks the
    /// version's rules, [`RfcError::UnsupportedCharset`] if a quoted-printable
    /// value names an unknown `CHARSET`, and [`RfcError::Io`] if the sink
    /// fails. Nothing is written for a rejected line.
    #[tracing::instrument(skip(self, line), fields(name = %line.name, version = %self.version))]
    pub fn write_property(&mut self, line: &ContentLine) -> RfcResult<()> {
        let dialect = self.version.dialect();

        if let Some(group) = &line.group {
            validate_group(group, self.version)?;
        }
        validate_property_name(&line.name, self.version)?;

        let mut params = Cow::Borrowed(&line.params);
        let mut value = Cow::Borrowed(line.value.as_str());
        let mut quoted_printable =
            dialect.quoted_printable_supported && line.params.is_quoted_printable();

        if value.contains(['\r', '\n']) {
            if dialect.quoted_printable_supported {
                if !quoted_printable {
                    tracing::debug!("Value has a line break; encoding as quoted-printable");
                    params.to_mut().push(VCardParameter::quoted_printable());
                    quoted_printable = true;
                }
            } else {
                value = Cow::Owned(escape_newlines(&value));
            }
        }

        let codec = if quoted_printable {
            let codec = QuotedPrintable::new(params.charset().unwrap_or(DEFAULT_CHARSET))?;
            if params.charset().is_none() && !value.is_ascii() {
                params.to_mut().push(VCardParameter::charset(DEFAULT_CHARSET));
            }
            Some(codec)
        } else {
            None
        };

        let mut head = self.head(line.group.as_deref(), &line.name, &params)?;
        head.push(':');

        self.out.write_str(&head)?;
        match codec {
            Some(codec) => self.out.write_quoted_printable(&codec.encode(&value))?,
            None => self.out.write_str(&value)?,
        }
        self.out.end_line()
    }

    /// Flushes and returns the sink.
    ///
    /// ## Errors
    /// Returns [`RfcError::Io`] if the sink fails.
    pub fn finish(self) -> RfcResult<W> {
        self.out.finish()
    }

    /// Validates and joins `[group.]NAME[;param]*`.
    fn head(&self, group: Option<&str>, name: &str, params: &Parameters) -> RfcResult<String> {
        let dialect = self.version.dialect();
        let mut head = String::new();

        if let Some(group) = group {
            head.push_str(group);
            head.push('.');
        }
        head.push_str(name);

        for param in params {
            for value in &param.values {
                validate_param_value(value, self.version)?;
            }

            let Some(param_name) = &param.name else {
                if !dialect.nameless_params_allowed {
                    return Err(RfcError::InvalidLine(format!(
                        "nameless parameter {:?} is not allowed in vCard {}",
                        param.value(),
                        self.version
                    )));
                }
                for value in &param.values {
                    if value.is_empty() {
                        return Err(RfcError::InvalidLine(
                            "empty nameless parameter".to_string(),
                        ));
                    }
                    head.push(';');
                    head.push_str(value);
                }
                continue;
            };

            validate_param_name(param_name, self.version)?;
            if dialect.comma_separates_values {
                head.push(';');
                head.push_str(param_name);
                head.push('=');
                head.push_str(&param.values.join(","));
            } else {
                for value in &param.values {
                    head.push(';');
                    head.push_str(param_name);
                    head.push('=');
                    head.push_str(value);
                }
            }
        }

        Ok(head)
    }
}

/// Replaces `\r\n`, `\n` and `\r` with the two characters `\n`.
fn escape_newlines(value: &str) -> String {
    value
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\\n")
}
