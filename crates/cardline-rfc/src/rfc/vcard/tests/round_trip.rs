//! Round-trip reading and writing tests.
//!
//! These tests verify that documents can be read, written back and read
//! again without losing structural information.

use super::fixtures::*;
use crate::rfc::vcard::build::{FoldProfile, LineWriter};
use crate::rfc::vcard::core::{ContentLine, VCardVersion};
use crate::rfc::vcard::parse::{Document, Event, read_str};

/// Escapes the (unescaped) parameter values of a read line for writing.
fn escape_params(line: &ContentLine, writer: &LineWriter<Vec<u8>>) -> ContentLine {
    let mut escaped = line.clone();
    for param in escaped.params.iter_mut() {
        for value in &mut param.values {
            *value = writer.escape_param_value(value);
        }
    }
    escaped
}

fn write_document(doc: &Document, profile: FoldProfile) -> Result<String, String> {
    let mut writer =
        LineWriter::new(Vec::new(), VCardVersion::V2_1, profile).with_caret_encoding(true);

    for event in &doc.events {
        let result = match event {
            Event::BeginComponent(name) => writer.begin_component(name),
            Event::EndComponent(name) => writer.end_component(name),
            Event::Version(value) => writer.write_version(value),
            Event::Property(line) => {
                let line = escape_params(line, &writer);
                writer.write_property(&line)
            }
        };
        result.map_err(|e| format!("Write failed for {event:?}: {e}"))?;
    }

    let bytes = writer.finish().map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Read a document, write it, then read again and compare.
fn round_trip_with(input: &str, profile: FoldProfile) -> Result<(), String> {
    let doc1 = read_str(input).map_err(|e| format!("First read failed: {e}"))?;
    let written = write_document(&doc1, profile)?;
    let doc2 = read_str(&written).map_err(|e| format!("Second read failed: {e}\n{written}"))?;

    if !doc2.warnings.is_empty() {
        return Err(format!("Warnings on re-read: {:?}\n{written}", doc2.warnings));
    }

    if doc1.events.len() != doc2.events.len() {
        return Err(format!(
            "Event count mismatch: {} vs {}\n{written}",
            doc1.events.len(),
            doc2.events.len()
        ));
    }

    for (first, second) in doc1.events.iter().zip(&doc2.events) {
        if first != second {
            return Err(format!("Event mismatch: {first:?} vs {second:?}\n{written}"));
        }
    }

    Ok(())
}

fn round_trip(input: &str) -> Result<(), String> {
    round_trip_with(input, FoldProfile::wire())
}

#[test_log::test]
fn round_trip_author() {
    round_trip(VCARD_AUTHOR).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_v3_groups() {
    round_trip(VCARD_V3_GROUPS).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_v4_caret() {
    round_trip(VCARD_V4_CARET).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_v21() {
    round_trip(VCARD_V21).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_folded() {
    round_trip(VCARD_FOLDED).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_mixed_versions() {
    round_trip(VCARD_MIXED_VERSIONS).expect("round trip should succeed");
}

#[test_log::test]
fn round_trip_all_profiles() {
    let profiles = [
        FoldProfile::wire(),
        FoldProfile::quoted_printable(),
        FoldProfile::mime(),
        FoldProfile::unfolded(),
        FoldProfile::new(Some(12), "\t", "\n").unwrap(),
    ];
    for profile in profiles {
        for fixture in [VCARD_AUTHOR, VCARD_V3_GROUPS, VCARD_V21] {
            round_trip_with(fixture, profile.clone()).expect("round trip should succeed");
        }
    }
}

#[test_log::test]
fn written_v21_uses_quoted_printable_for_line_breaks() {
    let doc = read_str(VCARD_V21).unwrap();
    let written = write_document(&doc, FoldProfile::unfolded()).unwrap();
    assert!(written.contains(
        "ADR;WORK;ENCODING=QUOTED-PRINTABLE:;;100 Waters Edge=0D=0ABaytown;LA;30314;United States of America\r\n"
    ));
    assert!(written.contains("NOTE:Café au lait\r\n"));
    assert!(written.contains("TEL;WORK;VOICE:(111) 555-1212\r\n"));
}
