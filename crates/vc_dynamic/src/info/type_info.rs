use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::handle::TypeHandle;
use crate::reflection::Typed;

// -----------------------------------------------------------------------------
// TypeInfo

/// A structural, serializable description of a type.
///
/// The descriptor names a type by its module path (`namespace`) and `name`,
/// plus the descriptors of its generic arguments. Anonymous types also carry
/// their declared properties, because they are matched by shape instead of
/// by name.
///
/// Descriptors are plain values: they are immutable once built, compare
/// structurally and hash consistently, so they can key resolver caches.
///
/// # Naming
///
/// [`full_name`] is the canonical key used by registries:
///
/// | type            | full name                        |
/// |-----------------|----------------------------------|
/// | `i32`           | `i32`                            |
/// | `String`        | `alloc::string::String`          |
/// | `Vec<i32>`      | `alloc::vec::Vec<i32>`           |
/// | `Box<[u8]>`     | `[u8]`                           |
/// | `Option<bool>`  | `core::option::Option<bool>`     |
///
/// # Examples
///
/// ```
/// use vc_dynamic::info::TypeInfo;
///
/// let list = TypeInfo::of::<Vec<i32>>();
/// assert_eq!(list.name(), "Vec");
/// assert_eq!(list.namespace(), Some("alloc::vec"));
/// assert!(list.is_generic());
/// assert_eq!(list.full_name(), "alloc::vec::Vec<i32>");
///
/// let bytes = TypeInfo::as_array_of(TypeInfo::of::<u8>());
/// assert_eq!(bytes.full_name(), "[u8]");
/// assert_eq!(bytes.element_type(), Some(&TypeInfo::of::<u8>()));
/// ```
///
/// [`full_name`]: TypeInfo::full_name
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeInfo {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    is_generic: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    generic_arguments: Vec<TypeInfo>,
    #[serde(default, skip_serializing_if = "is_false")]
    is_array: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    is_anonymous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<Vec<PropertyInfo>>,
}

#[inline(always)]
fn is_false(value: &bool) -> bool {
    !*value
}

impl TypeInfo {
    /// Creates a descriptor with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            is_generic: false,
            generic_arguments: Vec::new(),
            is_array: false,
            is_anonymous: false,
            properties: None,
        }
    }

    /// Returns the descriptor of `T`.
    ///
    /// This reads the cached [`TypeHandle`] of `T`, so the descriptor is
    /// only built once per type.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        TypeHandle::of::<T>().type_info().clone()
    }

    /// Creates the descriptor of an array whose items are `element`.
    pub fn as_array_of(element: TypeInfo) -> Self {
        let mut info = Self::new(alloc::format!("[{}]", element.name));
        info.is_array = true;
        info.generic_arguments.push(element);
        info
    }

    /// Sets the module path.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Removes the module path.
    pub fn without_namespace(mut self) -> Self {
        self.namespace = None;
        self
    }

    /// Sets the generic arguments, marking the descriptor generic when
    /// `arguments` is not empty.
    ///
    /// The element of an array descriptor is stored as its only argument,
    /// so this also replaces the element type of arrays.
    pub fn with_generic_arguments(mut self, arguments: Vec<TypeInfo>) -> Self {
        self.is_generic = !self.is_array && !arguments.is_empty();
        if self.is_array
            && let Some(element) = arguments.first()
        {
            self.name = alloc::format!("[{}]", element.name);
        }
        self.generic_arguments = arguments;
        self
    }

    /// Sets the declared properties.
    pub fn with_properties(mut self, properties: Vec<PropertyInfo>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Marks the descriptor as anonymous, i.e. matched by shape.
    pub fn anonymous(mut self) -> Self {
        self.is_anonymous = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        self.is_generic
    }

    #[inline]
    pub fn generic_arguments(&self) -> &[TypeInfo] {
        &self.generic_arguments
    }

    #[inline]
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.is_anonymous
    }

    /// Declared properties, only present for anonymous types.
    #[inline]
    pub fn properties(&self) -> Option<&[PropertyInfo]> {
        self.properties.as_deref()
    }

    /// Returns the element descriptor of an array.
    #[inline]
    pub fn element_type(&self) -> Option<&TypeInfo> {
        if self.is_array {
            self.generic_arguments.first()
        } else {
            None
        }
    }

    /// Returns the names of the declared properties.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .flatten()
            .map(|property| property.name.as_str())
    }

    /// The canonical name: `namespace::Name<Arg, ..>`, or `[Elem]` for arrays.
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        self.write_name(&mut out, true);
        out
    }

    /// The name without any module path, e.g. `Vec<i32>` or `[String]`.
    pub fn short_name(&self) -> String {
        let mut out = String::new();
        self.write_name(&mut out, false);
        out
    }

    fn write_name(&self, out: &mut String, qualified: bool) {
        if let Some(element) = self.element_type() {
            out.push('[');
            element.write_name(out, qualified);
            out.push(']');
            return;
        }
        if qualified && let Some(namespace) = &self.namespace {
            out.push_str(namespace);
            out.push_str("::");
        }
        out.push_str(&self.name);
        if !self.generic_arguments.is_empty() {
            out.push('<');
            for (index, argument) in self.generic_arguments.iter().enumerate() {
                if index > 0 {
                    out.push_str(", ");
                }
                argument.write_name(out, qualified);
            }
            out.push('>');
        }
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("TypeInfo");
        debug.field("full_name", &self.full_name());
        if self.is_anonymous {
            debug.field("properties", &self.properties);
        }
        debug.finish()
    }
}

// -----------------------------------------------------------------------------
// PropertyInfo

/// A declared property of an anonymous type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyInfo {
    name: String,
    #[serde(rename = "Type")]
    type_info: TypeInfo,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, type_info: TypeInfo) -> Self {
        Self {
            name: name.into(),
            type_info,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn full_and_short_names() {
        let map = TypeInfo::new("HashMap")
            .with_namespace("std::collections::hash::map")
            .with_generic_arguments(vec![
                TypeInfo::new("String").with_namespace("alloc::string"),
                TypeInfo::new("i64"),
            ]);
        assert_eq!(
            map.full_name(),
            "std::collections::hash::map::HashMap<alloc::string::String, i64>"
        );
        assert_eq!(map.short_name(), "HashMap<String, i64>");
        assert!(map.is_generic());
    }

    #[test]
    fn array_descriptor_keeps_element() {
        let array = TypeInfo::as_array_of(TypeInfo::new("i32"));
        assert!(array.is_array());
        assert!(!array.is_generic());
        assert_eq!(array.name(), "[i32]");

        let replaced = array.with_generic_arguments(vec![TypeInfo::new("u8")]);
        assert_eq!(replaced.full_name(), "[u8]");
    }

    #[test]
    fn serializes_with_pascal_case_and_skips_defaults() {
        let info = TypeInfo::new("Point")
            .with_namespace("geo")
            .anonymous()
            .with_properties(vec![PropertyInfo::new("X", TypeInfo::new("f64"))]);

        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(
            json,
            r#"{"Name":"Point","Namespace":"geo","IsAnonymous":true,"Properties":[{"Name":"X","Type":{"Name":"f64"}}]}"#
        );

        let back: TypeInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
        assert_eq!(back.property_names().collect::<Vec<_>>(), ["X"]);
    }
}
