//! Shared configuration, constants and error types for the cardline crates.

pub mod config;
pub mod constants;
pub mod error;
