/// Line terminators shared across crates
pub const CRLF: &str = "\r\n";
pub const LF: &str = "\n";
pub const CR: &str = "\r";

/// Default indent for folded continuation lines
pub const FOLD_INDENT: &str = " ";

/// Column widths of the fold presets
pub const WIRE_LINE_LENGTH: usize = 75;
pub const QUOTED_PRINTABLE_LINE_LENGTH: usize = 76;
pub const MIME_LINE_LENGTH: usize = 72;

/// Charset used when a property does not declare one
pub const DEFAULT_CHARSET: &str = "UTF-8";

pub const APP_NAME: &str = "cardline";

/// Prefix of environment variables read by [`crate::config::Settings::load`]
pub const ENV_PREFIX: &str = "CARDLINE";
pub const CONFIG_FILE: &str = const_str::concat!(APP_NAME, ".toml");

/// `VERSION` values the engine has rules for
pub const SUPPORTED_VERSIONS: [&str; 3] = ["2.1", "3.0", "4.0"];
