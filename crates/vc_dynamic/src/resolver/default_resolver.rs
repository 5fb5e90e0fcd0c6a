use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use parking_lot::RwLock;
use vc_utils::hash::HashMap;

use crate::Reflect;
use crate::handle::{MemberInfo, StructShape, TypeHandle};
use crate::impls::Record;
use crate::info::TypeInfo;
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::resolver::{ResolutionError, TypeResolver};

// -----------------------------------------------------------------------------
// DefaultTypeResolver

/// A [`TypeResolver`] searching a [`TypeRegistryArc`].
///
/// A descriptor is resolved by trying, in order:
///
/// 1. its full name;
/// 2. its name under each candidate namespace, then its short name if that
///    is unambiguous;
/// 3. for generic types and arrays, the same lookups after resolving every
///    argument, so that arguments given by short name still match;
/// 4. for anonymous types, any registered anonymous struct with the same
///    property names, and finally a synthesized handle whose values are
///    [`Record`]s.
///
/// Every candidate must also pass [`is_valid`](Self::is_valid).
/// Successful results are cached for the lifetime of the resolver.
///
/// # Examples
///
/// ```
/// use vc_dynamic::info::TypeInfo;
/// use vc_dynamic::registry::{TypeRegistry, TypeRegistryArc};
/// use vc_dynamic::resolver::{DefaultTypeResolver, TypeResolver};
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<String>>();
/// let resolver = DefaultTypeResolver::new(TypeRegistryArc::new(registry));
///
/// // The namespace of the argument is unknown to the sender.
/// let sent = TypeInfo::new("Vec")
///     .with_namespace("alloc::vec")
///     .with_generic_arguments(vec![TypeInfo::new("String")]);
///
/// let handle = resolver.resolve_type(&sent).unwrap();
/// assert_eq!(handle.full_name(), "alloc::vec::Vec<alloc::string::String>");
/// ```
pub struct DefaultTypeResolver {
    registry: TypeRegistryArc,
    candidate_namespaces: Vec<String>,
    record_fallback: bool,
    cache: RwLock<HashMap<TypeInfo, Arc<TypeHandle>>>,
}

impl DefaultTypeResolver {
    pub fn new(registry: TypeRegistryArc) -> Self {
        Self {
            registry,
            candidate_namespaces: Vec::new(),
            record_fallback: true,
            cache: RwLock::new(HashMap::default()),
        }
    }

    /// Adds a namespace searched when the descriptor's own one fails.
    pub fn with_candidate_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.candidate_namespaces.push(namespace.into());
        self
    }

    /// Enables or disables synthesizing [`Record`] handles for anonymous
    /// descriptors that match no registered type. Enabled by default.
    pub fn with_record_fallback(mut self, enabled: bool) -> Self {
        self.record_fallback = enabled;
        self
    }

    #[inline]
    pub fn registry(&self) -> &TypeRegistryArc {
        &self.registry
    }

    /// Returns `true` if `candidate` may stand for `type_info`.
    ///
    /// Anonymous descriptors match a type with exactly the same property
    /// names, in any order. Any other candidate found by name is valid.
    pub fn is_valid(type_info: &TypeInfo, candidate: &TypeHandle) -> bool {
        if !type_info.is_anonymous() {
            return true;
        }
        let mut expected: Vec<&str> = type_info.property_names().collect();
        let mut found: Vec<&str> = candidate.member_names().collect();
        expected.sort_unstable();
        found.sort_unstable();
        expected == found
    }

    fn lookup(&self, registry: &TypeRegistry, type_info: &TypeInfo) -> Option<Arc<TypeHandle>> {
        let accept = |handle: &Arc<TypeHandle>| Self::is_valid(type_info, handle);

        if let Some(handle) = registry.get_with_full_name(&type_info.full_name())
            && accept(handle)
        {
            return Some(Arc::clone(handle));
        }

        if type_info.element_type().is_none() {
            for namespace in &self.candidate_namespaces {
                let candidate = type_info.clone().with_namespace(namespace.as_str());
                if let Some(handle) = registry.get_with_full_name(&candidate.full_name())
                    && accept(handle)
                {
                    log::debug!("resolved `{type_info}` in candidate namespace `{namespace}`");
                    return Some(Arc::clone(handle));
                }
            }
        }

        let short_name = type_info.short_name();
        if let Some(handle) = registry.get_with_short_name(&short_name)
            && accept(handle)
        {
            log::debug!("resolved `{type_info}` by its short name `{short_name}`");
            return Some(Arc::clone(handle));
        }

        None
    }

    fn resolve_closed(&self, type_info: &TypeInfo) -> Result<Option<Arc<TypeHandle>>, ResolutionError> {
        if type_info.generic_arguments().is_empty() {
            return Ok(None);
        }

        let mut arguments = Vec::with_capacity(type_info.generic_arguments().len());
        for argument in type_info.generic_arguments() {
            let handle = self.resolve_type(argument).map_err(|source| {
                ResolutionError::GenericArgument {
                    type_name: type_info.full_name(),
                    source: Box::new(source),
                }
            })?;
            arguments.push(handle.type_info().clone());
        }

        let closed = type_info.clone().with_generic_arguments(arguments);
        if closed == *type_info {
            return Ok(None);
        }
        let registry = self.registry.read();
        Ok(self.lookup(&registry, &closed))
    }

    fn resolve_anonymous(&self, type_info: &TypeInfo) -> Result<Option<Arc<TypeHandle>>, ResolutionError> {
        {
            let registry = self.registry.read();
            if let Some(handle) = registry
                .anonymous_handles()
                .find(|handle| Self::is_valid(type_info, handle))
            {
                log::debug!("resolved `{type_info}` structurally as `{}`", handle.full_name());
                return Ok(Some(Arc::clone(handle)));
            }
        }

        if !self.record_fallback {
            return Ok(None);
        }

        log::warn!("no type matches anonymous `{type_info}`, synthesizing a record");
        self.synthesize_record(type_info).map(Some)
    }

    fn synthesize_record(&self, type_info: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError> {
        let mut members = Vec::new();
        for property in type_info.properties().unwrap_or_default() {
            let handle = self.resolve_type(property.type_info())?;
            members.push(MemberInfo::resolved(property.name().to_owned(), handle));
        }
        let shape = StructShape::new(members)
            .with_default(|| Box::new(Record::new()) as Box<dyn Reflect>)
            .anonymous();
        Ok(Arc::new(TypeHandle::synthesized(type_info.clone(), shape)))
    }

    fn resolve_uncached(&self, type_info: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError> {
        {
            let registry = self.registry.read();
            if let Some(handle) = self.lookup(&registry, type_info) {
                return Ok(handle);
            }
        }

        if let Some(handle) = self.resolve_closed(type_info)? {
            return Ok(handle);
        }

        if type_info.is_anonymous()
            && let Some(handle) = self.resolve_anonymous(type_info)?
        {
            return Ok(handle);
        }

        let type_name = type_info.full_name();
        if self.registry.read().is_ambiguous(&type_info.short_name()) {
            Err(ResolutionError::Ambiguous { type_name })
        } else {
            Err(ResolutionError::NotFound { type_name })
        }
    }
}

impl TypeResolver for DefaultTypeResolver {
    fn resolve_type(&self, type_info: &TypeInfo) -> Result<Arc<TypeHandle>, ResolutionError> {
        if let Some(handle) = self.cache.read().get(type_info) {
            log::trace!("resolver cache hit for `{type_info}`");
            return Ok(Arc::clone(handle));
        }

        let handle = self.resolve_uncached(type_info)?;
        self.cache.write().insert(type_info.clone(), Arc::clone(&handle));
        Ok(handle)
    }
}

impl fmt::Debug for DefaultTypeResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultTypeResolver")
            .field("candidate_namespaces", &self.candidate_namespaces)
            .field("record_fallback", &self.record_fallback)
            .field("cached", &self.cache.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;

    use super::DefaultTypeResolver;
    use crate::handle::{MemberInfo, StructShape, TypeHandle};
    use crate::info::{PropertyInfo, TypeInfo};
    use crate::registry::{TypeRegistry, TypeRegistryArc};
    use crate::resolver::{ResolutionError, TypeResolver};

    fn resolver() -> DefaultTypeResolver {
        let mut registry = TypeRegistry::new();
        registry.register::<Vec<i32>>();
        registry.register::<Option<String>>();
        DefaultTypeResolver::new(TypeRegistryArc::new(registry))
    }

    fn anonymous(names: &[&str]) -> TypeInfo {
        let properties = names
            .iter()
            .map(|name| PropertyInfo::new(*name, TypeInfo::of::<i32>()))
            .collect();
        TypeInfo::new("<>f__AnonymousType0").anonymous().with_properties(properties)
    }

    #[test]
    fn resolves_by_full_name() {
        let handle = resolver().resolve_type(&TypeInfo::of::<Vec<i32>>()).unwrap();
        assert!(Arc::ptr_eq(&handle, &TypeHandle::of::<Vec<i32>>()));
    }

    #[test]
    fn resolves_candidate_namespaces() {
        let resolver = resolver().with_candidate_namespace("core::option");
        let info = TypeInfo::new("Option")
            .with_namespace("System")
            .with_generic_arguments(vec![TypeInfo::of::<String>()]);
        let handle = resolver.resolve_type(&info).unwrap();
        assert_eq!(handle.full_name(), "core::option::Option<alloc::string::String>");
    }

    #[test]
    fn resolves_short_names() {
        let handle = resolver().resolve_type(&TypeInfo::new("i32")).unwrap();
        assert_eq!(handle.full_name(), "i32");

        let info = TypeInfo::new("Vec").with_generic_arguments(vec![TypeInfo::new("i32")]);
        let handle = resolver().resolve_type(&info).unwrap();
        assert_eq!(handle.full_name(), "alloc::vec::Vec<i32>");
    }

    #[test]
    fn reports_unknown_types() {
        let error = resolver()
            .resolve_type(&TypeInfo::new("Missing").with_namespace("nowhere"))
            .unwrap_err();
        assert_eq!(
            error,
            ResolutionError::NotFound {
                type_name: String::from("nowhere::Missing")
            }
        );
    }

    #[test]
    fn reports_failing_generic_arguments() {
        let info = TypeInfo::of::<Vec<i32>>()
            .with_generic_arguments(vec![TypeInfo::new("Missing")]);
        let error = resolver().resolve_type(&info).unwrap_err();
        assert!(matches!(
            error,
            ResolutionError::GenericArgument { ref source, .. }
                if matches!(**source, ResolutionError::NotFound { .. })
        ));
    }

    #[test]
    fn anonymous_types_match_structurally() {
        let mut registry = TypeRegistry::new();
        let handle = Arc::new(TypeHandle::synthesized(
            TypeInfo::new("Registered").anonymous(),
            StructShape::new(vec![MemberInfo::new::<i32>("A"), MemberInfo::new::<i32>("B")]),
        ));
        // Synthesized handles are not registrable, so check validity directly.
        assert!(!registry.register_handle(Arc::clone(&handle)));
        assert!(DefaultTypeResolver::is_valid(&anonymous(&["B", "A"]), &handle));
        assert!(!DefaultTypeResolver::is_valid(&anonymous(&["A"]), &handle));
        assert!(!DefaultTypeResolver::is_valid(&anonymous(&["A", "B", "C"]), &handle));
    }

    #[test]
    fn anonymous_types_fall_back_to_records() {
        let info = anonymous(&["X", "Y"]);
        let handle = resolver().resolve_type(&info).unwrap();
        assert!(handle.is_synthesized());
        assert_eq!(handle.member_names().collect::<Vec<_>>(), ["X", "Y"]);

        let strict = resolver().with_record_fallback(false);
        assert!(strict.resolve_type(&info).is_err());
    }

    #[test]
    fn results_are_cached() {
        let resolver = resolver();
        let info = anonymous(&["X"]);
        let first = resolver.resolve_type(&info).unwrap();
        let second = resolver.resolve_type(&info).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
