//! Documents shared by the integration tests.

/// An address book export mixing vCard 2.1 and 3.0 cards, folded and with
/// bare LF line endings.
///
/// The fold's leading space is written as `\x20` because a string
/// continuation would swallow it.
pub const ADDRESS_BOOK: &str = "\
BEGIN:VCARD\n\
VERSION:2.1\n\
N:Gump;Forrest\n\
FN:Forrest Gump\n\
TEL;WORK;VOICE:(111) 555-1212\n\
LABEL;WORK;ENCODING=QUOTED-PRINTABLE:100 Waters Edge=0D=0A=\n\
Baytown, LA 30314\n\
END:VCARD\n\
BEGIN:VCARD\n\
VERSION:3.0\n\
FN:Jane Doe\n\
item1.EMAIL;TYPE=INTERNET,pref:jane@example.com\n\
item1.X-ABLabel:Work\n\
NOTE:A note that is long enough that the exporting program decided to fol\n\
\x20d it onto a second line\n\
END:VCARD\n";

/// A vCard 2.1 card encoded in ISO-8859-1 with bare CR line endings.
#[must_use]
pub fn latin1_card() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BEGIN:VCARD\rVERSION:2.1\rFN:Ren");
    bytes.push(0xE9);
    bytes.extend_from_slice(b"\rNOTE;ENCODING=QUOTED-PRINTABLE:Na=EFve\rEND:VCARD\r");
    bytes
}
