//! Utility modules.

/// Log sanitization utilities to keep note bodies and keys out of logs.
pub mod log_sanitizer;
