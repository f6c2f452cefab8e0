use anyhow::Result;
use config::{Config, ConfigBuilder, builder::DefaultState};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use crate::constants::{
    CONFIG_FILE, CR, CRLF, DEFAULT_CHARSET, ENV_PREFIX, LF, SUPPORTED_VERSIONS,
};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub read: ReadConfig,
    pub write: WriteConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewlineStyle {
    Crlf,
    Lf,
    Cr,
}

impl NewlineStyle {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crlf => CRLF,
            Self::Lf => LF,
            Self::Cr => CR,
        }
    }
}

/// Named fold presets. The widths live with the fold profile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldPreset {
    Wire,
    QuotedPrintable,
    Mime,
    Unfolded,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadConfig {
    /// Version assumed until a `VERSION` property says otherwise.
    pub default_version: String,
    pub caret_decoding: bool,
    /// Newline produced when unescaping `\n` and `^n`.
    pub newline: NewlineStyle,
    /// Encoding of the byte stream and fallback charset for quoted-printable values.
    pub charset: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WriteConfig {
    pub version: String,
    pub caret_encoding: bool,
    pub profile: FoldPreset,
    pub newline: NewlineStyle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber` filter directives, e.g. `info` or `cardline_rfc=trace`.
    pub level: String,
}

impl LoggingConfig {
    /// ## Summary
    /// Builds the filter for a tracing subscriber from `level`.
    ///
    /// ## Errors
    /// Returns [`CoreError::ConfigError`] if `level` is not a valid directive.
    pub fn env_filter(&self) -> CoreResult<EnvFilter> {
        EnvFilter::try_new(&self.level).map_err(|err| {
            CoreError::ConfigError(format!("logging.level {:?}: {err}", self.level))
        })
    }
}

fn check_version(key: &str, value: &str) -> CoreResult<()> {
    if SUPPORTED_VERSIONS.contains(&value.trim()) {
        Ok(())
    } else {
        Err(CoreError::ConfigError(format!(
            "{key} must be one of {SUPPORTED_VERSIONS:?}, got {value:?}"
        )))
    }
}

impl ReadConfig {
    /// ## Errors
    /// Returns [`CoreError::ConfigError`] for an unsupported default version
    /// and [`CoreError::InvalidInput`] for an empty charset.
    pub fn validate(&self) -> CoreResult<()> {
        check_version("read.default_version", &self.default_version)?;
        if self.charset.trim().is_empty() {
            return Err(CoreError::InvalidInput("read.charset is empty".to_string()));
        }
        Ok(())
    }
}

impl WriteConfig {
    /// ## Errors
    /// Returns [`CoreError::ConfigError`] for an unsupported version.
    pub fn validate(&self) -> CoreResult<()> {
        check_version("write.version", &self.version)
    }
}

impl Settings {
    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("read.default_version", "4.0")?
            .set_default("read.caret_decoding", true)?
            .set_default("read.newline", "lf")?
            .set_default("read.charset", DEFAULT_CHARSET)?
            .set_default("write.version", "4.0")?
            .set_default("write.caret_encoding", false)?
            .set_default("write.profile", "wire")?
            .set_default("write.newline", "crlf")?
            .set_default("logging.level", "info")?)
    }

    /// ## Summary
    /// Loads configuration from defaults, `CARDLINE__*` environment variables
    /// and an optional `cardline.toml`. Environment variables take precedence
    /// over the file.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Self::load_with(Self::environment())
    }

    /// Values stay strings so that `VERSION`-like values such as `3.0` are
    /// not turned into numbers.
    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .ignore_empty(true)
    }

    fn load_with(environment: config::Environment) -> Result<Self> {
        Ok(Self::defaults()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            // Env
            .add_source(environment)
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Errors
    /// Returns the first problem found in the `[read]`, `[write]` or
    /// `[logging]` section.
    pub fn validate(&self) -> CoreResult<()> {
        self.read.validate()?;
        self.write.validate()?;
        self.logging.env_filter().map(drop)
    }

    /// ## Summary
    /// Builds settings from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::defaults()?
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            read: ReadConfig {
                default_version: "4.0".to_string(),
                caret_decoding: true,
                newline: NewlineStyle::Lf,
                charset: DEFAULT_CHARSET.to_string(),
            },
            write: WriteConfig {
                version: "4.0".to_string(),
                caret_encoding: false,
                profile: FoldPreset::Wire,
                newline: NewlineStyle::Crlf,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    settings.validate()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
