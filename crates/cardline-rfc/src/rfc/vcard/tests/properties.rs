//! Property-based tests for the inverse pairs of the line layer.

use proptest::prelude::*;

use crate::rfc::vcard::build::{
    FoldProfile, FoldedWriter, LineWriter, escape_param_value, escape_value, fold_line,
};
use crate::rfc::vcard::codec::QuotedPrintable;
use crate::rfc::vcard::core::{ContentLine, Parameters, VCardParameter, VCardVersion};
use crate::rfc::vcard::parse::{ParseOptions, parse_line, unescape, unescape_value, unfold};

/// Printable ASCII with at least one non-space character.
fn line_text() -> impl Strategy<Value = String> {
    "[ -~]{0,200}[!-~][ -~]{0,40}"
}

fn new_version() -> impl Strategy<Value = VCardVersion> {
    prop_oneof![Just(VCardVersion::V3), Just(VCardVersion::V4)]
}

fn new_syntax_line() -> impl Strategy<Value = ContentLine> {
    let param = (
        "[A-Z][A-Z0-9-]{0,6}",
        prop::collection::vec("[a-zA-Z0-9 ,;:\"^\\\\.=\n]{0,8}", 1..3),
    )
        .prop_map(|(name, values)| VCardParameter::multi(name, values));
    (
        prop::option::of("[a-z][a-z0-9-]{0,8}"),
        "[A-Z][A-Z0-9-]{0,10}",
        prop::collection::vec(param, 0..4),
        "[ -~]{0,120}",
    )
        .prop_map(|(group, name, params, value)| ContentLine {
            group,
            name,
            params: Parameters::from(params),
            value,
        })
}

fn old_syntax_line() -> impl Strategy<Value = ContentLine> {
    let named = ("[A-Z][A-Z0-9-]{0,6}", "([a-zA-Z0-9,;\"^\\\\.=][a-zA-Z0-9 ,;\"^\\\\.=\n]{0,8})?")
        .prop_map(|(name, value)| VCardParameter::new(name, value));
    let nameless = "[A-Z]{1,8}".prop_map(VCardParameter::nameless);
    (
        prop::option::of("[a-z][a-z0-9_-]{0,8}"),
        "[A-Z][A-Z0-9_-]{0,10}",
        prop::collection::vec(prop_oneof![named, nameless], 0..4),
        "[ -~]{0,120}",
    )
        .prop_map(|(group, name, params, value)| ContentLine {
            group,
            name,
            params: Parameters::from(params),
            value,
        })
}

/// Writes `line` with escaped parameter values and parses it back.
fn write_then_parse(line: &ContentLine, version: VCardVersion, caret: bool) -> ContentLine {
    let mut escaped = line.clone();
    for param in escaped.params.iter_mut() {
        for value in &mut param.values {
            *value = escape_param_value(value, version, caret);
        }
    }

    let mut writer = LineWriter::new(Vec::new(), version, FoldProfile::wire());
    writer.write_property(&escaped).unwrap();
    let written = String::from_utf8(writer.finish().unwrap()).unwrap();

    let logical = unfold(&written);
    assert_eq!(logical.len(), 1, "{written:?}");
    let options = ParseOptions::new(version).with_caret_decoding(caret);
    parse_line(&logical[0], &options).unwrap()
}

proptest! {
    #[test]
    fn fold_then_unfold_is_identity(text in line_text(), width in 2usize..100) {
        let profile = FoldProfile::new(Some(width), " ", "\r\n").unwrap();
        let folded = fold_line(&text, &profile).unwrap();
        for physical in folded.split("\r\n") {
            prop_assert!(physical.chars().count() <= width);
        }
        prop_assert_eq!(unfold(&folded), vec![text]);
    }

    #[test]
    fn quoted_printable_utf8_round_trip(text in any::<String>()) {
        let codec = QuotedPrintable::default();
        let encoded = codec.encode(&text);
        prop_assert!(encoded.bytes().all(|b| b.is_ascii() && b != b'\r' && b != b'\n'));
        prop_assert_eq!(codec.decode(&encoded).unwrap(), text);
    }

    #[test]
    fn quoted_printable_latin1_round_trip(text in "[ -~\u{a0}-\u{ff}\r\n]{0,80}") {
        let codec = QuotedPrintable::new("ISO-8859-1").unwrap();
        prop_assert_eq!(codec.decode(&codec.encode(&text)).unwrap(), text);
    }

    #[test]
    fn quoted_printable_triplets_survive_folding(text in "\\PC{0,60}", width in 4usize..40) {
        let codec = QuotedPrintable::default();
        let profile = FoldProfile::new(Some(width), " ", "\r\n").unwrap();
        let mut writer = FoldedWriter::new(Vec::new(), profile);
        writer.write_quoted_printable(&codec.encode(&text)).unwrap();
        let out = String::from_utf8(writer.finish().unwrap()).unwrap();

        let joined: String = out.split("\r\n").enumerate()
            .map(|(i, line)| if i == 0 { line } else { &line[1..] })
            .collect();
        for physical in out.split("\r\n") {
            prop_assert!(!physical.ends_with('='));
            let tail = physical.len().saturating_sub(2);
            prop_assert!(!physical[tail..].starts_with('='));
        }
        prop_assert_eq!(codec.decode(&joined).unwrap(), text);
    }

    #[test]
    fn value_escape_then_unescape(text in "[^\r]{0,80}") {
        prop_assert_eq!(unescape_value(&escape_value(&text), "\n"), text);
    }

    #[test]
    fn new_syntax_param_escape_then_parse(
        text in "[a-zA-Z0-9 ,;:\"^\\\\.=\n]{0,30}",
        version in new_version(),
        caret in any::<bool>(),
    ) {
        let escaped = escape_param_value(&text, version, caret);
        let line = format!("X-TEST;X-P={escaped}:value");
        let options = ParseOptions::new(version).with_caret_decoding(caret);
        let parsed = parse_line(&line, &options).unwrap();
        prop_assert_eq!(parsed.params.first("X-P"), Some(text.as_str()));
    }

    #[test]
    fn old_syntax_param_escape_then_unescape(text in "[a-zA-Z0-9 ,;\"^\\\\.=\n]{0,30}") {
        let escaped = escape_param_value(&text, VCardVersion::V2_1, false);
        let options = ParseOptions::new(VCardVersion::V2_1);
        prop_assert_eq!(unescape(&escaped, &options), text);
    }

    #[test]
    fn new_syntax_line_round_trip(
        line in new_syntax_line(),
        version in new_version(),
        caret in any::<bool>(),
    ) {
        let parsed = write_then_parse(&line, version, caret);
        prop_assert_eq!(parsed, line);
    }

    #[test]
    fn old_syntax_line_round_trip(line in old_syntax_line()) {
        let parsed = write_then_parse(&line, VCardVersion::V2_1, false);
        prop_assert_eq!(parsed, line);
    }
}
