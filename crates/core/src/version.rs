//! Format versioning constants for serialized scripts and inputs.
//!
//! Versions are written into every JSON envelope so readers can reject
//! payloads produced by an incompatible release.

/// Current schema version for JSON scripts.
/// Increment MINOR for compatible changes, MAJOR for breaking changes.
pub const SCRIPT_SCHEMA_VERSION: &str = "1.0";

/// Current schema version for storyboard and transcription inputs.
pub const INPUT_SCHEMA_VERSION: &str = "1.0";
