//! Shared utilities for Soulbound ID.

pub mod logging;

pub use logging::{init_logging, LogFormat};
