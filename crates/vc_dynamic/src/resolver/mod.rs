//! Turning [`TypeInfo`](crate::info::TypeInfo) descriptors back into types.
//!
//! The mapper never looks a type up by itself. It asks a [`TypeResolver`],
//! which it receives on construction. [`DynamicObjectMapper::new`] takes
//! the process-wide [`default_resolver`], which can be replaced with
//! [`set_default_resolver`].
//!
//! [`DynamicObjectMapper::new`]: crate::mapper::DynamicObjectMapper::new

// -----------------------------------------------------------------------------
// Modules

mod default_resolver;
mod error;
mod global;

// -----------------------------------------------------------------------------
// Exports

pub use default_resolver::DefaultTypeResolver;
pub use error::ResolutionError;
pub use global::{default_resolver, set_default_resolver};

// -----------------------------------------------------------------------------
// TypeResolver

use alloc::sync::Arc;

use crate::handle::TypeHandle;
use crate::info::TypeInfo;

/// A strategy for finding the type a descriptor stands for.
pub trait TypeResolver: Send + Sync {
    /// Returns the handle of the type described by `type_info`.
    fn resolve_type(&self, type_info: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError>;
}

impl<R: TypeResolver + ?Sized> TypeResolver for Arc<R> {
    #[inline]
    fn resolve_type(&self, type_info: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError> {
        (**self).resolve_type(type_info)
    }
}
