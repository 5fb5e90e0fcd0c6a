use alloc::string::String;

use thiserror::Error;

/// A property with the same name already exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a property named `{name}` already exists")]
pub struct AmbiguousMemberError {
    pub name: String,
}
