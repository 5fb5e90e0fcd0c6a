use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use parking_lot::RwLock;
use vc_utils::hash::HashSet;

use crate::info::TypeInfo;
use crate::object::{AmbiguousMemberError, PropertySet, Value, WRAPPED_VALUE};

// -----------------------------------------------------------------------------
// Identities

/// Identity of a [`DynamicObject`], stable while any handle to it is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

impl ObjectId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0
    }
}

/// Handle returned by [`DynamicObject::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A change notification.
///
/// `old_value` is `None` when the property was added, `new_value` is `None`
/// when it was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyChanged {
    pub name: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
}

type Observer = Arc<dyn Fn(&DynamicObject, &PropertyChanged) + Send + Sync>;

// -----------------------------------------------------------------------------
// DynamicObject

struct ObjectData {
    type_info: Option<TypeInfo>,
    properties: PropertySet,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

/// A shared bag of named values with an optional type descriptor.
///
/// Cloning a `DynamicObject` clones the handle, not the data: every clone
/// sees the same properties, and [`id`](DynamicObject::id) and
/// [`ptr_eq`](DynamicObject::ptr_eq) tell handles of the same object
/// apart from equal copies. This is how shared and cyclic graphs are
/// represented.
///
/// Equality is structural and terminates on cycles.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{info::TypeInfo, object::{DynamicObject, Value}};
///
/// let order = DynamicObject::with_type(TypeInfo::new("Order").with_namespace("shop"));
/// order.set("Id", 7);
/// order.set("Customer", "Ada");
/// assert_eq!(order.get("Id"), Some(Value::I32(7)));
/// assert_eq!(order.property_names(), ["Id", "Customer"]);
///
/// let same = order.clone();
/// same.set("Id", 8);
/// assert_eq!(order.get("Id"), Some(Value::I32(8)));
/// assert!(order.ptr_eq(&same));
///
/// let wrapped = DynamicObject::wrap_value(None, 3.5_f64);
/// assert!(wrapped.is_wrapped_value());
/// assert_eq!(wrapped.wrapped_value(), Some(Value::F64(3.5)));
/// ```
#[derive(Clone)]
pub struct DynamicObject {
    inner: Arc<RwLock<ObjectData>>,
}

impl Default for DynamicObject {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicObject {
    /// Creates an empty, untyped object.
    #[inline]
    pub fn new() -> Self {
        Self::from_parts(None, PropertySet::new())
    }

    /// Creates an empty object of the given type.
    #[inline]
    pub fn with_type(type_info: TypeInfo) -> Self {
        Self::from_parts(Some(type_info), PropertySet::new())
    }

    pub fn from_parts(type_info: Option<TypeInfo>, properties: PropertySet) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ObjectData {
                type_info,
                properties,
                observers: Vec::new(),
                next_observer: 0,
            })),
        }
    }

    /// Creates an object holding a single value under the name `""`.
    pub fn wrap_value(type_info: Option<TypeInfo>, value: impl Into<Value>) -> Self {
        let mut properties = PropertySet::new();
        properties.set(WRAPPED_VALUE, value);
        Self::from_parts(type_info, properties)
    }

    #[inline]
    pub fn type_info(&self) -> Option<TypeInfo> {
        self.inner.read().type_info.clone()
    }

    #[inline]
    pub fn set_type_info(&self, type_info: Option<TypeInfo>) {
        self.inner.write().type_info = type_info;
    }

    /// Returns a copy of the property called `name`.
    #[inline]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.inner.read().properties.get(name).cloned()
    }

    /// Sets a property, appending it if absent. Returns the replaced value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        let old_value = self.inner.write().properties.set(name.clone(), value.clone());
        self.notify(PropertyChanged {
            name,
            old_value: old_value.clone(),
            new_value: Some(value),
        });
        old_value
    }

    /// Appends a property, failing if the name is already taken.
    pub fn add(
        &self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), AmbiguousMemberError> {
        let name = name.into();
        let value = value.into();
        self.inner
            .write()
            .properties
            .add(name.clone(), value.clone())?;
        self.notify(PropertyChanged {
            name,
            old_value: None,
            new_value: Some(value),
        });
        Ok(())
    }

    pub fn remove(&self, name: &str) -> Option<Value> {
        let old_value = self.inner.write().properties.remove(name)?;
        self.notify(PropertyChanged {
            name: name.into(),
            old_value: Some(old_value.clone()),
            new_value: None,
        });
        Some(old_value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.read().properties.contains(name)
    }

    pub fn property_names(&self) -> Vec<String> {
        self.inner.read().properties.names().map(String::from).collect()
    }

    #[inline]
    pub fn property_count(&self) -> usize {
        self.inner.read().properties.len()
    }

    /// Returns a snapshot of the properties.
    ///
    /// Nested objects in the snapshot are still shared handles.
    #[inline]
    pub fn properties(&self) -> PropertySet {
        self.inner.read().properties.clone()
    }

    /// Returns the type descriptor and a snapshot of the properties.
    pub fn snapshot(&self) -> (Option<TypeInfo>, PropertySet) {
        let data = self.inner.read();
        (data.type_info.clone(), data.properties.clone())
    }

    /// Returns `true` if the object holds exactly one property named `""`.
    pub fn is_wrapped_value(&self) -> bool {
        let data = self.inner.read();
        data.properties.len() == 1 && data.properties.contains(WRAPPED_VALUE)
    }

    /// Returns the wrapped value, if this object is one.
    pub fn wrapped_value(&self) -> Option<Value> {
        let data = self.inner.read();
        if data.properties.len() == 1 {
            data.properties.get(WRAPPED_VALUE).cloned()
        } else {
            None
        }
    }

    /// The identity of the underlying object.
    #[inline]
    pub fn id(&self) -> ObjectId {
        ObjectId(Arc::as_ptr(&self.inner) as usize)
    }

    /// Returns `true` if both handles refer to the same object.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // -------------------------------------------------------------------------
    // Observers

    /// Registers a callback invoked after every property change.
    ///
    /// Callbacks run after the object is unlocked, so they may read or
    /// modify it.
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    /// use vc_dynamic::object::DynamicObject;
    ///
    /// let object = DynamicObject::new();
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = seen.clone();
    /// let id = object.subscribe(move |_, change| sink.lock().unwrap().push(change.name.clone()));
    ///
    /// object.set("A", 1);
    /// object.remove("A");
    /// assert!(object.unsubscribe(id));
    /// object.set("B", 2);
    /// assert_eq!(*seen.lock().unwrap(), ["A", "A"]);
    /// ```
    pub fn subscribe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&DynamicObject, &PropertyChanged) + Send + Sync + 'static,
    {
        let mut data = self.inner.write();
        let id = ObserverId(data.next_observer);
        data.next_observer += 1;
        data.observers.push((id, Arc::new(observer)));
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut data = self.inner.write();
        let before = data.observers.len();
        data.observers.retain(|(observer, _)| *observer != id);
        data.observers.len() != before
    }

    fn notify(&self, change: PropertyChanged) {
        let observers: Vec<Observer> = {
            let data = self.inner.read();
            if data.observers.is_empty() {
                return;
            }
            data.observers.iter().map(|(_, f)| Arc::clone(f)).collect()
        };
        for observer in observers {
            observer(self, &change);
        }
    }

    // -------------------------------------------------------------------------
    // Structural comparison

    pub(crate) fn eq_in(&self, other: &Self, visited: &mut HashSet<(usize, usize)>) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        // A pair already under comparison is assumed equal; any difference
        // is reported by the comparison that is still running.
        if !visited.insert((self.id().0, other.id().0)) {
            return true;
        }
        let (left_type, left) = self.snapshot();
        let (right_type, right) = other.snapshot();
        left_type == right_type
            && left.len() == right.len()
            && left.iter().zip(right.iter()).all(|(a, b)| {
                a.name() == b.name() && a.value().eq_in(b.value(), visited)
            })
    }
}

impl PartialEq for DynamicObject {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut HashSet::default())
    }
}

std::thread_local! {
    static DEBUG_STACK: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

impl fmt::Debug for DynamicObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id().0;
        if DEBUG_STACK.with_borrow(|stack| stack.contains(&id)) {
            return f.write_str("<cycle>");
        }

        let (type_info, properties) = self.snapshot();
        DEBUG_STACK.with_borrow_mut(|stack| stack.push(id));
        let result = f
            .debug_struct("DynamicObject")
            .field("type", &type_info.map(|info| info.full_name()))
            .field("properties", &properties)
            .finish();
        DEBUG_STACK.with_borrow_mut(|stack| stack.pop());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn cyclic_graphs_compare_and_print() {
        let a = DynamicObject::with_type(TypeInfo::new("Node"));
        a.set("Name", "a");
        a.set("Next", a.clone());

        let b = DynamicObject::with_type(TypeInfo::new("Node"));
        b.set("Name", "a");
        b.set("Next", b.clone());

        assert_eq!(a, b);
        b.set("Name", "b");
        assert_ne!(a, b);

        let printed = format!("{a:?}");
        assert!(printed.contains("<cycle>"));
        assert!(printed.contains("Node"));
    }

    #[test]
    fn type_info_takes_part_in_equality() {
        let a = DynamicObject::wrap_value(Some(TypeInfo::new("i32")), 1);
        let b = DynamicObject::wrap_value(None, 1);
        assert_ne!(a, b);
        b.set_type_info(Some(TypeInfo::new("i32")));
        assert_eq!(a, b);
    }

    #[test]
    fn wrapped_value_requires_single_property() {
        let object = DynamicObject::wrap_value(None, Value::Null);
        assert!(object.is_wrapped_value());
        object.set("Other", 1);
        assert!(!object.is_wrapped_value());
        assert_eq!(object.wrapped_value(), None);
    }

    #[test]
    fn add_does_not_notify_on_conflict() {
        let object = DynamicObject::new();
        let count = Arc::new(core::sync::atomic::AtomicUsize::new(0));
        let counter = count.clone();
        object.subscribe(move |_, _| {
            counter.fetch_add(1, core::sync::atomic::Ordering::Relaxed);
        });
        object.add("A", 1).unwrap();
        assert!(object.add("A", 2).is_err());
        assert_eq!(count.load(core::sync::atomic::Ordering::Relaxed), 1);
    }
}
