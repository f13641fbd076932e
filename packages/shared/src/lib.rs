//! Utilities shared across Scorecast packages.

pub mod logger;
pub mod time;
