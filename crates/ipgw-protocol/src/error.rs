//! Protocol error types

use thiserror::Error;

/// Errors that can occur while building requests or decoding replies
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A field required by the operation was not supplied
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// Reply body is not valid JSON
    #[error("Invalid JSON reply: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reply body is valid JSON but not an object
    #[error("Expected a JSON object reply, got {0}")]
    NotAnObject(&'static str),
}
