use alloc::sync::Arc;
use std::sync::LazyLock;

use arc_swap::ArcSwapOption;

use crate::registry::TypeRegistryArc;
use crate::resolver::{DefaultTypeResolver, TypeResolver};

struct ResolverSlot(Arc<dyn TypeResolver>);

static DEFAULT_RESOLVER: ArcSwapOption<ResolverSlot> = ArcSwapOption::const_empty();

static BUILTIN: LazyLock<Arc<dyn TypeResolver>> = LazyLock::new(|| {
    Arc::new(DefaultTypeResolver::new(TypeRegistryArc::global().clone()))
});

/// Returns the process-wide resolver.
///
/// Unless replaced, this is a [`DefaultTypeResolver`] over
/// [`TypeRegistryArc::global`].
pub fn default_resolver() -> Arc<dyn TypeResolver> {
    match DEFAULT_RESOLVER.load_full() {
        Some(slot) => Arc::clone(&slot.0),
        None => Arc::clone(&BUILTIN),
    }
}

/// Replaces the process-wide resolver. `None` restores the built-in one.
///
/// Mappers hold on to the resolver they were created with, so this only
/// affects mappers created afterwards.
pub fn set_default_resolver(resolver: Option<Arc<dyn TypeResolver>>) {
    DEFAULT_RESOLVER.store(resolver.map(|resolver| Arc::new(ResolverSlot(resolver))));
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use super::{default_resolver, set_default_resolver};
    use crate::handle::TypeHandle;
    use crate::info::TypeInfo;
    use crate::resolver::{ResolutionError, TypeResolver};

    struct OnlyBool;

    impl TypeResolver for OnlyBool {
        fn resolve_type(&self, _: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError> {
            Ok(TypeHandle::of::<bool>())
        }
    }

    // The only test touching the global slot.
    #[test]
    fn replace_and_restore() {
        let string = TypeInfo::of::<alloc::string::String>();

        set_default_resolver(Some(Arc::new(OnlyBool)));
        let handle = default_resolver().resolve_type(&string).unwrap();
        assert_eq!(handle.full_name(), "bool");

        set_default_resolver(None);
        let handle = default_resolver().resolve_type(&string).unwrap();
        assert_eq!(handle.full_name(), "alloc::string::String");
    }
}
