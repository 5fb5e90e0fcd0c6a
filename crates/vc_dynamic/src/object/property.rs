use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::object::{AmbiguousMemberError, Value};

// -----------------------------------------------------------------------------
// Property

/// A named value.
#[derive(Clone, PartialEq)]
pub struct Property {
    name: String,
    value: Value,
}

impl Property {
    #[inline]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    #[inline]
    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {:?}", self.name, self.value)
    }
}

// -----------------------------------------------------------------------------
// PropertySet

/// An ordered set of properties with unique names.
///
/// Properties keep their insertion order. Objects rarely have more than a
/// handful of members, so lookups are linear scans.
///
/// # Examples
///
/// ```
/// use vc_dynamic::object::{PropertySet, Value};
///
/// let mut set = PropertySet::new();
/// set.add("Key", "K1").unwrap();
/// set.add("Value", "V1").unwrap();
/// assert!(set.add("Key", "K2").is_err());
///
/// assert_eq!(set.set("Key", "K2"), Some(Value::from("K1")));
/// assert_eq!(set.names().collect::<Vec<_>>(), ["Key", "Value"]);
/// ```
#[derive(Clone, Default, PartialEq)]
pub struct PropertySet {
    items: Vec<Property>,
}

impl PropertySet {
    #[inline]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a property, failing if the name is already taken.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), AmbiguousMemberError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(AmbiguousMemberError { name });
        }
        self.items.push(Property::new(name, value));
        Ok(())
    }

    /// Sets a property, appending it if absent. Returns the replaced value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.get_mut(&name) {
            Some(slot) => Some(core::mem::replace(slot, value)),
            None => {
                self.items.push(Property { name, value });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.items
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.value)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.items
            .iter_mut()
            .find(|property| property.name == name)
            .map(|property| &mut property.value)
    }

    /// Removes a property, keeping the order of the others.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let index = self.items.iter().position(|property| property.name == name)?;
        Some(self.items.remove(index).value)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|property| property.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Property> {
        self.items.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|property| property.name.as_str())
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<'a> IntoIterator for &'a PropertySet {
    type Item = &'a Property;
    type IntoIter = core::slice::Iter<'a, Property>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for PropertySet {
    type Item = Property;
    type IntoIter = alloc::vec::IntoIter<Property>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<Property> for PropertySet {
    /// Collects properties, keeping the last value of a repeated name.
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = Self::new();
        for property in iter {
            set.set(property.name, property.value);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_keeps_order() {
        let mut set: PropertySet = [
            Property::new("a", 1),
            Property::new("b", 2),
            Property::new("c", 3),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.remove("b"), Some(Value::I32(2)));
        assert_eq!(set.remove("b"), None);
        assert_eq!(set.names().collect::<Vec<_>>(), ["a", "c"]);
    }

    #[test]
    fn collecting_replaces_duplicates() {
        let set: PropertySet = [Property::new("a", 1), Property::new("a", 2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("a"), Some(&Value::I32(2)));
    }

    #[test]
    fn ambiguous_add_reports_name() {
        let mut set = PropertySet::new();
        set.add("Id", 1).unwrap();
        let error = set.add("Id", 2).unwrap_err();
        assert_eq!(error.name, "Id");
        assert_eq!(set.get("Id"), Some(&Value::I32(1)));
    }
}
