//! Field-level allow/deny filtering.
//!
//! Filtering never adds, drops or reorders fields. It only substitutes the value of
//! a field with [`REDACTED`], leaving names (and file metadata) visible so redacted
//! fields can still be correlated.

mod config;
mod filter;
mod path;
#[cfg(test)]
mod tests;

pub use config::*;
pub use filter::*;
pub use path::*;

/// Replacement value for redacted fields. Distinct from `null` and `""` so that a
/// legitimately empty field is never mistaken for a redacted one.
pub const REDACTED: &str = "[REDACTED]";
