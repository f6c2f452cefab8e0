//! cardline - integration test support.
//!
//! This crate re-exports the workspace crates so integration tests can use
//! `cardline_test::` paths, and holds the documents they share.

pub mod component {
    pub use cardline_core::*;
}

pub use cardline_rfc as rfc;

pub mod samples;

use cardline_core::config::LoggingConfig;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// ## Summary
/// Installs a global subscriber filtered by `[logging] level`.
///
/// Returns `false` if a subscriber was already installed (for example by
/// `test_log`), in which case nothing changes.
///
/// ## Errors
/// Returns an error if the configured level is not a valid filter.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<bool> {
    let filter = config.env_filter()?;
    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_test_writer())
        .try_init()
        .is_ok())
}
