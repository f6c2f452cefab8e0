//! Content-line engine for the vCard text format (2.1, 3.0 and 4.0).
//!
//! Reads and writes the generic `[group.]NAME;PARAM=VALUE:value` lines that
//! every property shares: unfolding and folding, quoted-printable transport
//! encoding, and the version-dependent escaping rules. Interpreting the
//! value of a particular property is left to the caller.

pub mod error;
pub mod rfc;
