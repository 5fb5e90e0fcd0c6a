use alloc::string::{String, ToString};
use core::fmt::Display;

use thiserror::Error;

/// A payload that does not describe a dynamic object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed dynamic object payload: {message}")]
pub struct MalformedPayloadError {
    pub message: String,
}

impl MalformedPayloadError {
    pub fn new(message: impl Display) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
