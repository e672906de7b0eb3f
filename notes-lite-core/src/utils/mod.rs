//! Utility modules.

/// Date/time serialization helpers shared by note and folder records.
pub mod datetime;
