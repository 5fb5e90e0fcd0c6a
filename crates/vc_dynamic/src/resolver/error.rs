use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

/// An error returned when a descriptor cannot be resolved.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResolutionError {
    #[error("no registered type matches `{type_name}`")]
    NotFound { type_name: String },

    #[error("the short name of `{type_name}` matches several registered types")]
    Ambiguous { type_name: String },

    #[error("cannot resolve a generic argument of `{type_name}`")]
    GenericArgument {
        type_name: String,
        #[source]
        source: Box<ResolutionError>,
    },
}

impl ResolutionError {
    /// The full name of the descriptor that failed to resolve.
    pub fn type_name(&self) -> &str {
        match self {
            Self::NotFound { type_name }
            | Self::Ambiguous { type_name }
            | Self::GenericArgument { type_name, .. } => type_name,
        }
    }
}
