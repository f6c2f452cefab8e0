//! Core content-line types.

mod parameter;
mod property;
mod version;

pub use parameter::{Parameters, QUOTED_PRINTABLE, VCardParameter, names as param_names};
pub use property::{ContentLine, names};
pub use version::{Dialect, VCardVersion};
