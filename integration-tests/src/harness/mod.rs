pub mod collector;
pub mod exchange;
pub mod tracing;

pub use self::collector::{MockCollector, Submission};
pub use self::exchange::{Exchange, Part, multipart_body};
pub use self::tracing::{CapturedEvent, EventLog, capture_events};
