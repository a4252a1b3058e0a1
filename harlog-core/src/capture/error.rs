use std::error::Error;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum BodyReadError {
    #[error("failed to read body: {0}")]
    Stream(#[source] Box<dyn Error + Send + Sync>),

    #[error("body was already consumed by a failed read")]
    Consumed,
}

impl BodyReadError {
    pub(crate) fn stream(e: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Stream(e.into())
    }
}
