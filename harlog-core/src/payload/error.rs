use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("an API key is required to attribute the request to a group")]
    MissingApiKey,
}
