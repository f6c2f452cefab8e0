//! Readers and writers built from configuration.

use cardline_test::component::config::{NewlineStyle, Settings};
use cardline_test::rfc::error::RfcError;
use cardline_test::rfc::rfc::vcard::{
    ContentLine, LineWriter, ReaderOptions, VCardParameter, VCardVersion, read_document,
};
use cardline_test::init_tracing;
use cardline_test::samples::latin1_card;

/// ## Summary
/// Test that the configured charset decodes raw bytes and quoted-printable
/// values without a `CHARSET` parameter.
#[test_log::test]
fn configured_charset_reads_latin1() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str(
        r#"
        [read]
        default_version = "2.1"
        charset = "ISO-8859-1"
        newline = "crlf"
        "#,
    )?;
    let options = ReaderOptions::from_config(&settings.read)?;
    assert_eq!(options.newline, "\r\n");

    let doc = read_document(latin1_card().as_slice(), options)?;
    let values: Vec<_> = doc.properties().map(|p| p.value.as_str()).collect();
    assert_eq!(values, vec!["René", "Naïve"]);
    Ok(())
}

/// ## Summary
/// Test that the write section selects version, fold preset and newline.
#[test_log::test]
fn configured_writer() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str(
        r#"
        [write]
        version = "3.0"
        profile = "unfolded"
        newline = "lf"
        caret_encoding = true
        "#,
    )?;
    assert_eq!(settings.write.newline, NewlineStyle::Lf);

    let mut writer = LineWriter::from_config(Vec::new(), &settings.write)?;
    assert_eq!(writer.version(), VCardVersion::V3);

    let label = writer.escape_param_value("Main St.\n\"North\" wing, 2nd floor");
    let line = ContentLine::new("ADR", format!(";;{};;;;", "x".repeat(90)))
        .with_param(VCardParameter::new("LABEL", label));
    writer.write_property(&line)?;
    let written = String::from_utf8(writer.finish()?)?;

    assert_eq!(
        written,
        format!(
            "ADR;LABEL=\"Main St.^n^'North^' wing, 2nd floor\":;;{};;;;\n",
            "x".repeat(90)
        )
    );
    Ok(())
}

/// ## Summary
/// Test that invalid configuration is rejected before any output.
#[test_log::test]
fn invalid_configuration_is_rejected() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str("[write]\nversion = \"5.0\"")?;
    assert!(matches!(
        LineWriter::from_config(Vec::new(), &settings.write),
        Err(RfcError::CoreError(_))
    ));

    let settings = Settings::from_toml_str("[read]\ncharset = \"x-unknown\"")?;
    assert!(matches!(
        ReaderOptions::from_config(&settings.read),
        Err(RfcError::UnsupportedCharset(_))
    ));
    Ok(())
}

/// ## Summary
/// Test that the logging level feeds the subscriber and that a bad level is
/// reported instead of silently ignored.
#[test_log::test]
fn configured_logging_level() -> anyhow::Result<()> {
    let settings = Settings::from_toml_str("[logging]\nlevel = \"cardline_rfc=debug\"")?;
    // `test_log` already installed a subscriber for this test.
    assert!(!init_tracing(&settings.logging)?);

    let settings = Settings::from_toml_str("[logging]\nlevel = \"cardline_rfc=loud\"")?;
    assert!(init_tracing(&settings.logging).is_err());
    assert!(settings.validate().is_err());
    Ok(())
}
