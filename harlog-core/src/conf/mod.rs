//! Configuration surface of the middleware.
//!
//! Raw options ([`MetricsOptionsSpec`]) accept deprecated list aliases. They are
//! merged and validated once by [`normalize_options`], so everything downstream only
//! ever sees the canonical [`MetricsOptions`].

mod error;
mod loader;
mod normalize;
#[cfg(test)]
mod tests;
mod types;

pub use error::*;
pub use loader::*;
pub use normalize::*;
pub use types::*;
