//! Quoted-printable transport encoding for vCard 2.1 property values.

use encoding_rs::Encoding;

use crate::error::{RfcError, RfcResult};

const HEX_ENCODE: &[u8; 16] = b"0123456789ABCDEF";

const HEX_DECODE: [i8; 256] = {
    let mut t = [-1i8; 256];
    let mut i = 0u8;
    while i < 10 {
        t[(b'0' + i) as usize] = i as i8;
        i += 1;
    }
    let mut i = 0u8;
    while i < 6 {
        t[(b'A' + i) as usize] = (10 + i) as i8;
        t[(b'a' + i) as usize] = (10 + i) as i8;
        i += 1;
    }
    t
};

/// Returns whether a byte is written as itself.
///
/// Printable ASCII except `=`, plus space and tab.
#[must_use]
pub const fn is_printable(byte: u8) -> bool {
    matches!(byte, b'!'..=b'<' | b'>'..=b'~' | b' ' | b'\t')
}

/// Quoted-printable codec bound to one charset.
#[derive(Debug, Clone, Copy)]
pub struct QuotedPrintable {
    encoding: &'static Encoding,
}

impl QuotedPrintable {
    /// Creates a codec for the given charset label (e.g. `UTF-8`, `ISO-8859-1`).
    ///
    /// ## Errors
    /// Returns [`RfcError::UnsupportedCharset`] if the label is not a charset
    /// that can be both encoded and decoded (see [`resolve_charset`]).
    pub fn new(charset: &str) -> RfcResult<Self> {
        Ok(Self {
            encoding: resolve_charset(charset)?,
        })
    }

    /// Creates a codec for an already resolved encoding.
    #[must_use]
    pub const fn with_encoding(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// The charset name, as `encoding_rs` spells it.
    #[must_use]
    pub fn charset(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encodes text as quoted-printable.
    ///
    /// Characters that cannot be represented in the charset are written as
    /// HTML decimal character references (`日` becomes `&#26085;`) before
    /// encoding, which is what `encoding_rs` does for unmappable input.
    #[must_use]
    pub fn encode(&self, text: &str) -> String {
        let (bytes, _, _) = self.encoding.encode(text);
        let mut result = String::with_capacity(bytes.len());

        for &byte in bytes.iter() {
            if is_printable(byte) {
                result.push(char::from(byte));
            } else {
                result.push('=');
                result.push(char::from(HEX_ENCODE[usize::from(byte >> 4)]));
                result.push(char::from(HEX_ENCODE[usize::from(byte & 0x0f)]));
            }
        }

        result
    }

    /// Decodes quoted-printable text.
    ///
    /// Soft line breaks (`=` followed by CRLF or LF) are removed.
    ///
    /// ## Errors
    /// Returns [`RfcError::Decoding`] carrying the input when an escape is
    /// truncated or not made of two hex digits.
    pub fn decode(&self, text: &str) -> RfcResult<String> {
        let src = text.as_bytes();
        let mut bytes = Vec::with_capacity(src.len());
        let mut pos = 0;

        while pos < src.len() {
            let b = src[pos];
            if b != b'=' {
                bytes.push(b);
                pos += 1;
                continue;
            }

            match src.get(pos + 1..pos + 3) {
                Some(&[b'\r', b'\n']) => pos += 3,
                _ if src.get(pos + 1) == Some(&b'\n') => pos += 2,
                Some(&[hex1, hex2]) => {
                    let (Ok(high), Ok(low)) = (
                        u8::try_from(HEX_DECODE[usize::from(hex1)]),
                        u8::try_from(HEX_DECODE[usize::from(hex2)]),
                    ) else {
                        return Err(decoding_error(text));
                    };
                    bytes.push((high << 4) | low);
                    pos += 3;
                }
                _ => return Err(decoding_error(text)),
            }
        }

        let (decoded, _) = self.encoding.decode_without_bom_handling(&bytes);
        Ok(decoded.into_owned())
    }
}

/// ## Summary
/// Resolves a charset label to an encoding usable in both directions.
///
/// `encoding_rs` encodes UTF-16 and the `replacement` encoding as UTF-8, so
/// their output would not decode back; those labels are refused.
///
/// ## Errors
/// Returns [`RfcError::UnsupportedCharset`] if the label is unknown or
/// names such an encoding.
pub fn resolve_charset(label: &str) -> RfcResult<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
        .filter(|encoding| encoding.output_encoding() == *encoding)
        .ok_or_else(|| RfcError::UnsupportedCharset(label.to_string()))
}

impl Default for QuotedPrintable {
    fn default() -> Self {
        Self::with_encoding(encoding_rs::UTF_8)
    }
}

fn decoding_error(text: &str) -> RfcError {
    tracing::debug!(value = %text, "Malformed quoted-printable escape");
    RfcError::Decoding {
        value: text.to_string(),
    }
}
