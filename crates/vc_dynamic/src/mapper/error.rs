use alloc::string::String;

use thiserror::Error;

use crate::mapper::MemberPath;
use crate::resolver::ResolutionError;

/// An error returned when a dynamic object cannot be mapped to a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MappingError {
    #[error("expected {expected} at `{path}`, found {found}")]
    Incompatible {
        expected: String,
        found: String,
        path: MemberPath,
    },

    #[error("no value for member `{name}` of `{type_name}` at `{path}`")]
    MissingProperty {
        name: String,
        type_name: String,
        path: MemberPath,
    },

    #[error("cannot determine the type to build at `{path}`")]
    UnknownTarget { path: MemberPath },

    #[error("the object graph cycles through `{type_name}` at `{path}`, which cannot be shared")]
    Cycle { type_name: String, path: MemberPath },

    #[error("`{type_name}` at `{path}` has neither a default nor a member constructor")]
    Unconstructible { type_name: String, path: MemberPath },

    #[error("`{type_name}` rejected the value built for it at `{path}`")]
    Rejected { type_name: String, path: MemberPath },

    #[error("cannot resolve the type at `{path}`: {source}")]
    Resolution {
        source: ResolutionError,
        path: MemberPath,
    },
}

impl MappingError {
    /// The member path the error happened at.
    ///
    /// Empty when the root object's own type could not be determined.
    pub fn path(&self) -> &MemberPath {
        match self {
            Self::Incompatible { path, .. }
            | Self::MissingProperty { path, .. }
            | Self::UnknownTarget { path }
            | Self::Cycle { path, .. }
            | Self::Unconstructible { path, .. }
            | Self::Rejected { path, .. }
            | Self::Resolution { path, .. } => path,
        }
    }
}
