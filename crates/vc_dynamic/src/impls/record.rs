use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::handle::{StructShape, TypeHandle, TypeShape};
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef, Struct};
use crate::{Reflect, Typed};

/// A structural value with named members, built at runtime.
///
/// The mapper produces a `Record` when a dynamic object describes a type
/// that cannot be found in this process (an anonymous type from the other
/// side), or when it has no type at all. A record remembers the descriptor
/// it was built for, so mapping it back produces an object of the original
/// type.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{Reflect, impls::Record, ops::Struct};
///
/// let mut record = Record::new();
/// record.insert("Name", String::from("Ada"));
/// record.insert("Age", 36_u8);
///
/// assert_eq!(record.member_len(), 2);
/// assert_eq!(record.get_as::<u8>("Age"), Some(&36));
/// assert_eq!(record.names().collect::<Vec<_>>(), ["Name", "Age"]);
/// ```
#[derive(Default)]
pub struct Record {
    type_info: Option<TypeInfo>,
    fields: Vec<(String, Box<dyn Reflect>)>,
}

impl Record {
    #[inline]
    pub const fn new() -> Self {
        Self {
            type_info: None,
            fields: Vec::new(),
        }
    }

    /// The descriptor this record stands for.
    #[inline]
    pub fn type_info(&self) -> Option<&TypeInfo> {
        self.type_info.as_ref()
    }

    #[inline]
    pub fn set_type_info(&mut self, type_info: Option<TypeInfo>) {
        self.type_info = type_info;
    }

    /// Sets a member, replacing any member with the same name.
    #[inline]
    pub fn insert(&mut self, name: impl Into<String>, value: impl Reflect) {
        self.insert_boxed(name, Box::new(value));
    }

    pub fn insert_boxed(&mut self, name: impl Into<String>, value: Box<dyn Reflect>) {
        let name = name.into();
        match self.fields.iter_mut().find(|(field, _)| *field == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Reflect> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| &**value)
    }

    /// Returns the member called `name` if it has type `T`.
    #[inline]
    pub fn get_as<T: Any>(&self, name: &str) -> Option<&T> {
        self.get(name)?.downcast_ref::<T>()
    }

    /// Removes a member and returns it.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn Reflect>> {
        let index = self.fields.iter().position(|(field, _)| field == name)?;
        Some(self.fields.remove(index).1)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, value) in &self.fields {
            map.entry(name, &value.type_handle().type_path());
        }
        map.finish()
    }
}

impl Reflect for Record {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    fn represented_type_info(&self) -> Option<TypeInfo> {
        match &self.type_info {
            Some(info) => Some(info.clone()),
            None => Some(self.type_handle().type_info().clone()),
        }
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Struct(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Struct(self)
    }
}

impl Struct for Record {
    #[inline]
    fn member(&self, name: &str) -> Option<&dyn Reflect> {
        self.get(name)
    }

    #[inline]
    fn member_at(&self, index: usize) -> Option<&dyn Reflect> {
        self.fields.get(index).map(|(_, value)| &**value)
    }

    #[inline]
    fn name_at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|(name, _)| name.as_str())
    }

    #[inline]
    fn member_len(&self) -> usize {
        self.fields.len()
    }

    fn set_member(&mut self, name: &str, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
        self.insert_boxed(name, value);
        Ok(())
    }
}

impl Typed for Record {
    fn type_info() -> TypeInfo {
        TypeInfo::new("Record").with_namespace("vc_dynamic")
    }

    fn type_shape() -> TypeShape {
        TypeShape::Struct(
            StructShape::new(Vec::new())
                .with_default(|| Box::new(Record::new()) as Box<dyn Reflect>)
                .open(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn represents_its_descriptor() {
        let mut record = Record::new();
        assert_eq!(record.represented_type_info(), Some(<Record as Typed>::type_info()));

        let anonymous = TypeInfo::new("<>f__AnonymousType0").anonymous();
        record.set_type_info(Some(anonymous.clone()));
        assert_eq!(record.represented_type_info(), Some(anonymous));
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut record = Record::new();
        record.insert("A", 1_i32);
        record.insert("B", 2_i32);
        record.insert("A", String::from("one"));
        assert_eq!(record.names().collect::<Vec<_>>(), ["A", "B"]);
        assert_eq!(record.get_as::<String>("A").map(String::as_str), Some("one"));
        assert!(record.remove("B").is_some());
        assert_eq!(record.len(), 1);
    }
}
