//! Whole-document reading and writing.

use cardline_test::rfc::rfc::vcard::{
    ContentLine, Event, FoldProfile, LineWriter, Reader, ReaderOptions, VCardVersion, read_document,
};
use cardline_test::samples::ADDRESS_BOOK;

fn property<'a>(events: &'a [Event], name: &str) -> &'a ContentLine {
    events
        .iter()
        .find_map(|event| match event {
            Event::Property(line) if line.is_named(name) => Some(line),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no {name} property"))
}

/// ## Summary
/// Test that an address book with mixed versions reads cleanly.
#[test_log::test]
fn read_address_book() -> anyhow::Result<()> {
    let doc = read_document(ADDRESS_BOOK.as_bytes(), ReaderOptions::default())?;
    assert!(doc.warnings.is_empty(), "{:?}", doc.warnings);

    let versions: Vec<_> = doc
        .events
        .iter()
        .filter_map(|event| match event {
            Event::Version(v) => Some(v.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(versions, vec!["2.1", "3.0"]);

    let label = property(&doc.events, "LABEL");
    assert_eq!(label.value, "100 Waters Edge\r\nBaytown, LA 30314");
    assert_eq!(label.params.nameless_values(), vec!["WORK"]);

    let email = property(&doc.events, "EMAIL");
    assert_eq!(email.group.as_deref(), Some("item1"));
    assert_eq!(email.params.values_of("type"), vec!["INTERNET", "pref"]);

    let note = property(&doc.events, "NOTE");
    assert!(note.value.contains("decided to fold it onto"));
    Ok(())
}

/// ## Summary
/// Test that the streaming reader exposes nesting and the active version.
#[test_log::test]
fn streaming_reader_tracks_state() -> anyhow::Result<()> {
    let mut reader = Reader::new(ADDRESS_BOOK.as_bytes(), ReaderOptions::default());
    assert_eq!(reader.version(), VCardVersion::V2_1);

    let mut seen_v3 = false;
    while let Some(event) = reader.next() {
        match event? {
            Event::Property(line) if line.is_named("FN") => {
                assert_eq!(reader.open_components().collect::<Vec<_>>(), vec!["VCARD"]);
                if line.value == "Jane Doe" {
                    assert_eq!(reader.version(), VCardVersion::V3);
                    seen_v3 = true;
                }
            }
            Event::EndComponent(_) => {
                assert_eq!(reader.open_components().count(), 0);
                assert_eq!(reader.version(), VCardVersion::V2_1);
            }
            _ => {}
        }
    }
    assert!(seen_v3);
    assert!(reader.warnings().is_empty());
    Ok(())
}

/// ## Summary
/// Test that writing the read events and reading them again is lossless.
#[test_log::test]
fn write_then_read_again() -> anyhow::Result<()> {
    let first = read_document(ADDRESS_BOOK.as_bytes(), ReaderOptions::default())?;

    let mut writer = LineWriter::new(Vec::new(), VCardVersion::V2_1, FoldProfile::mime());
    for event in &first.events {
        match event {
            Event::BeginComponent(name) => writer.begin_component(name)?,
            Event::EndComponent(name) => writer.end_component(name)?,
            Event::Version(value) => writer.write_version(value)?,
            Event::Property(line) => {
                let mut line = line.clone();
                for param in line.params.iter_mut() {
                    for value in &mut param.values {
                        *value = writer.escape_param_value(value);
                    }
                }
                writer.write_property(&line)?;
            }
        }
    }
    let written = String::from_utf8(writer.finish()?)?;
    tracing::debug!(%written, "Rewritten address book");

    for physical in written.split("\r\n") {
        assert!(physical.chars().count() <= 72, "{physical:?}");
    }
    assert!(written.contains("LABEL;WORK;ENCODING=QUOTED-PRINTABLE:100 Waters Edge=0D=0ABaytown"));

    let second = read_document(written.as_bytes(), ReaderOptions::default())?;
    assert!(second.warnings.is_empty());
    assert_eq!(first.events, second.events);
    Ok(())
}
