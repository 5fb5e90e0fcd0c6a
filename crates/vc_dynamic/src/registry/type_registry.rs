use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;

use vc_utils::TypeIdMap;
use vc_utils::hash::{HashMap, HashSet};

use crate::Typed;
use crate::handle::{TypeHandle, TypeShape};
use crate::impls::Record;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A set of known types, searchable by name.
///
/// Two name indices are kept:
///
/// - full names (`alloc::vec::Vec<i32>`), which are unique;
/// - short names (`Vec<i32>`), where a name shared by several types is
///   marked ambiguous and no longer resolves.
///
/// Shared wrappers (`Arc<T>`, `Arc<RwLock<T>>`) carry the descriptor of `T`
/// and are only indexed by [`TypeId`].
///
/// # Examples
///
/// ```
/// use vc_dynamic::registry::TypeRegistry;
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Vec<Option<u8>>>();
///
/// assert!(registry.get_with_full_name("alloc::vec::Vec<core::option::Option<u8>>").is_some());
/// // Dependencies are registered too.
/// assert!(registry.get_with_short_name("Option<u8>").is_some());
/// ```
pub struct TypeRegistry {
    handles: TypeIdMap<Arc<TypeHandle>>,
    full_name_to_id: HashMap<String, TypeId>,
    short_name_to_id: HashMap<String, TypeId>,
    ambiguous_names: HashSet<String>,
    auto_registered: bool,
}

impl Default for TypeRegistry {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates a registry without any types.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            handles: TypeIdMap::new(),
            full_name_to_id: HashMap::with_hasher(vc_utils::hash::FixedHashState),
            short_name_to_id: HashMap::with_hasher(vc_utils::hash::FixedHashState),
            ambiguous_names: HashSet::with_hasher(vc_utils::hash::FixedHashState),
            auto_registered: false,
        }
    }

    /// Creates a registry with the scalar types and [`Record`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<()>();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry.register::<Record>();
        registry
    }

    // The type must not be registered yet.
    fn add_name_indices(&mut self, handle: &TypeHandle) {
        if matches!(handle.shape(), TypeShape::Shared(_)) {
            return;
        }
        let type_id = handle.type_id();
        let info = handle.type_info();

        let short_name = info.short_name();
        if !self.ambiguous_names.contains(&short_name) {
            match self.short_name_to_id.remove(&short_name) {
                Some(_) => {
                    log::debug!("short type name `{short_name}` is ambiguous");
                    self.ambiguous_names.insert(short_name);
                }
                None => {
                    self.short_name_to_id.insert(short_name, type_id);
                }
            }
        }

        self.full_name_to_id.insert(info.full_name(), type_id);
    }

    /// Registers `T` and, if it was new, the types it depends on.
    pub fn register<T: Typed>(&mut self) {
        if self.register_handle(TypeHandle::of::<T>()) {
            T::register_dependencies(self);
        }
    }

    /// Registers a handle. Returns `false` if its type was already present.
    ///
    /// Synthesized handles are never registered: they describe values of
    /// type [`Record`], which has a handle of its own.
    pub fn register_handle(&mut self, handle: Arc<TypeHandle>) -> bool {
        let type_id = handle.type_id();
        if handle.is_synthesized() || self.handles.contains(&type_id) {
            return false;
        }
        self.add_name_indices(&handle);
        self.handles.insert(type_id, handle);
        true
    }

    /// Registers every type marked `#[reflect(auto_register)]`.
    ///
    /// Returns `false` when the `auto_register` feature is disabled.
    /// Repeated calls are cheap.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            if !self.auto_registered {
                crate::__macro_exports::auto_register::register_types(self);
                self.auto_registered = true;
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.handles.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&Arc<TypeHandle>> {
        self.handles.get(&type_id)
    }

    pub fn get_with_full_name(&self, full_name: &str) -> Option<&Arc<TypeHandle>> {
        match self.full_name_to_id.get(full_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Looks a type up by its short name.
    ///
    /// Returns `None` for names shared by several types; see
    /// [`is_ambiguous`](Self::is_ambiguous).
    pub fn get_with_short_name(&self, short_name: &str) -> Option<&Arc<TypeHandle>> {
        match self.short_name_to_id.get(short_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    #[inline]
    pub fn is_ambiguous(&self, short_name: &str) -> bool {
        self.ambiguous_names.contains(short_name)
    }

    /// Iterates over the handles of anonymous structs.
    pub fn anonymous_handles(&self) -> impl Iterator<Item = &Arc<TypeHandle>> {
        self.handles.values().filter(|handle| handle.is_anonymous())
    }

    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Arc<TypeHandle>> {
        self.handles.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Full names of all indexed types, in no particular order.
    pub(crate) fn full_names(&self) -> impl Iterator<Item = &str> {
        self.full_name_to_id.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;
    use alloc::vec;
    use core::any::TypeId;

    use parking_lot::RwLock;

    use super::TypeRegistry;
    use crate::handle::{MemberInfo, StructShape, TypeHandle};
    use crate::info::TypeInfo;

    #[test]
    fn registration_is_idempotent() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.register_handle(TypeHandle::of::<u8>()));
        assert!(!registry.register_handle(TypeHandle::of::<u8>()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn shared_wrappers_are_not_named() {
        let mut registry = TypeRegistry::empty();
        registry.register::<Arc<RwLock<i32>>>();
        assert!(registry.contains(TypeId::of::<Arc<RwLock<i32>>>()));
        let by_name = registry.get_with_full_name("i32").unwrap();
        assert_eq!(by_name.type_id(), TypeId::of::<i32>());
    }

    #[test]
    fn synthesized_handles_are_rejected() {
        let mut registry = TypeRegistry::empty();
        let handle = TypeHandle::synthesized(
            TypeInfo::new("Anon").anonymous(),
            StructShape::new(vec![MemberInfo::new::<i32>("A")]),
        );
        assert!(!registry.register_handle(Arc::new(handle)));
        assert!(registry.is_empty());
    }

    #[cfg(feature = "auto_register")]
    #[derive(crate::derive::Reflect, Default)]
    #[reflect(auto_register, default)]
    struct Collected {
        value: i32,
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn marked_types_are_collected() {
        let mut registry = TypeRegistry::empty();
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Collected>()));
        assert!(registry.contains(TypeId::of::<i32>()));

        let global = crate::registry::TypeRegistryArc::global().read();
        assert!(global.contains(TypeId::of::<Collected>()));
    }
}
