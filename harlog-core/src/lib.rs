pub mod body;
pub mod capture;
pub mod conf;
pub mod delivery;
pub mod har;
pub mod logging;
pub mod normalization;
pub mod payload;
pub mod redaction;
pub mod serialize;

pub use capture::{BufferedRequest, BufferedResponse, CapturedRequest, CapturedResponse};
pub use conf::{MetricsOptions, load_options, normalize_options};
pub use har::LogEntry;
pub use payload::{LogContext, LogId, PayloadAssembler, PayloadError};
pub use redaction::RedactionConfig;
