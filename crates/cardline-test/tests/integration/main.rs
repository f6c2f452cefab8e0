//! Integration tests for reading and writing vCard content lines.

mod configured;
mod documents;
