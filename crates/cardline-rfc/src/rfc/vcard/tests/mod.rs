//! Cross-module tests for the vCard line layer.

mod properties;
mod round_trip;
