//! Request/response serializers.
//!
//! Each side is split into a head, computed eagerly from headers and URL, and a
//! final record that is only produced once the body has been read.

mod request;
mod response;
#[cfg(test)]
mod tests;

pub use request::*;
pub use response::*;

/// HAR value for sizes that are not measured.
pub const UNKNOWN_SIZE: i64 = -1;
