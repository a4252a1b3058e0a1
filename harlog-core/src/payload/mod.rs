mod assembler;
mod context;
mod error;
mod log_id;

pub use assembler::*;
pub use context::*;
pub use error::*;
pub use log_id::*;

/// Link to the collector's page for one log entry, suitable for an
/// `x-documentation-url` response header.
pub fn documentation_url(base_log_url: &str, id: &LogId) -> String {
    format!("{}/logs/{}", base_log_url.trim_end_matches('/'), id.0)
}
