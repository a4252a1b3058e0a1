//! Thin delivery collaborator: ships assembled entries to the collector.
//!
//! No retry, batching or backoff happens here. Payload construction never depends
//! on the outcome of a delivery.

mod client;
mod error;

pub use client::*;
pub use error::*;
