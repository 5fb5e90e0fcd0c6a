use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Reflect;
use crate::handle::{TypeHandle, TypeRef};
use crate::info::ScalarKind;
use crate::object::Value;
use crate::ops::ReflectKind;
use crate::reflection::Typed;

// -----------------------------------------------------------------------------
// TypeShape

/// How values of a type are taken apart and built again.
///
/// Every shape carries plain function pointers that construct values of the
/// type from already-built parts. Builders return `None` when a part has
/// the wrong type, which the mapper reports as a rejected value.
pub enum TypeShape {
    Scalar(ScalarShape),
    Enum(EnumShape),
    Option(OptionShape),
    Struct(StructShape),
    Collection(CollectionShape),
    Map(MapShape),
    Pair(PairShape),
    Grouping(GroupingShape),
    Shared(SharedShape),
}

impl TypeShape {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Scalar(_) => ReflectKind::Scalar,
            Self::Enum(_) => ReflectKind::Enum,
            Self::Option(_) => ReflectKind::Option,
            Self::Struct(_) => ReflectKind::Struct,
            Self::Collection(_) => ReflectKind::Collection,
            Self::Map(_) => ReflectKind::Map,
            Self::Pair(_) => ReflectKind::Pair,
            Self::Grouping(_) => ReflectKind::Grouping,
            Self::Shared(_) => ReflectKind::Shared,
        }
    }

    #[inline]
    pub fn as_struct(&self) -> Option<&StructShape> {
        match self {
            Self::Struct(shape) => Some(shape),
            _ => None,
        }
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&ScalarShape> {
        match self {
            Self::Scalar(shape) => Some(shape),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(shape) => write!(f, "Scalar({})", shape.kind),
            Self::Struct(shape) => f
                .debug_struct("Struct")
                .field("members", &shape.members)
                .field("anonymous", &shape.anonymous)
                .finish(),
            Self::Collection(shape) => write!(f, "Collection({:?})", shape.kind),
            other => write!(f, "{}", other.kind()),
        }
    }
}

// -----------------------------------------------------------------------------
// Scalar

pub struct ScalarShape {
    kind: ScalarKind,
    from_value: fn(Value) -> Option<Box<dyn Reflect>>,
}

impl ScalarShape {
    #[inline]
    pub const fn new(kind: ScalarKind, from_value: fn(Value) -> Option<Box<dyn Reflect>>) -> Self {
        Self { kind, from_value }
    }

    #[inline]
    pub fn kind(&self) -> ScalarKind {
        self.kind
    }

    /// Builds a value from a [`Value`] already coerced to [`kind`](Self::kind).
    #[inline]
    pub fn build(&self, value: Value) -> Option<Box<dyn Reflect>> {
        (self.from_value)(value)
    }
}

// -----------------------------------------------------------------------------
// Enum

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantInfo {
    name: &'static str,
    discriminant: i64,
}

impl VariantInfo {
    #[inline]
    pub const fn new(name: &'static str, discriminant: i64) -> Self {
        Self { name, discriminant }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn discriminant(&self) -> i64 {
        self.discriminant
    }
}

pub struct EnumShape {
    variants: Vec<VariantInfo>,
    from_index: fn(usize) -> Option<Box<dyn Reflect>>,
}

impl EnumShape {
    #[inline]
    pub fn new(variants: Vec<VariantInfo>, from_index: fn(usize) -> Option<Box<dyn Reflect>>) -> Self {
        Self {
            variants,
            from_index,
        }
    }

    #[inline]
    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    pub fn index_of_name(&self, name: &str) -> Option<usize> {
        self.variants.iter().position(|variant| variant.name == name)
    }

    pub fn index_of_discriminant(&self, discriminant: i64) -> Option<usize> {
        self.variants
            .iter()
            .position(|variant| variant.discriminant == discriminant)
    }

    #[inline]
    pub fn build(&self, index: usize) -> Option<Box<dyn Reflect>> {
        (self.from_index)(index)
    }
}

// -----------------------------------------------------------------------------
// Option

pub struct OptionShape {
    inner: TypeRef,
    none: fn() -> Box<dyn Reflect>,
    some: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
}

impl OptionShape {
    #[inline]
    pub fn new(
        inner: TypeRef,
        none: fn() -> Box<dyn Reflect>,
        some: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self { inner, none, some }
    }

    #[inline]
    pub fn inner(&self) -> Arc<TypeHandle> {
        self.inner.get()
    }

    #[inline]
    pub fn build_none(&self) -> Box<dyn Reflect> {
        (self.none)()
    }

    #[inline]
    pub fn build_some(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.some)(value)
    }
}

// -----------------------------------------------------------------------------
// Struct

/// A member of a struct shape.
#[derive(Debug, Clone)]
pub struct MemberInfo {
    name: Cow<'static, str>,
    ty: TypeRef,
    data_member: bool,
}

impl MemberInfo {
    /// A member of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            ty: TypeRef::of::<T>(),
            data_member: false,
        }
    }

    /// A member whose handle is only known at runtime.
    #[inline]
    pub fn resolved(name: impl Into<Cow<'static, str>>, handle: Arc<TypeHandle>) -> Self {
        Self {
            name: name.into(),
            ty: TypeRef::Resolved(handle),
            data_member: false,
        }
    }

    /// Marks the member as part of the data contract.
    #[inline]
    pub fn data_member(mut self) -> Self {
        self.data_member = true;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn type_handle(&self) -> Arc<TypeHandle> {
        self.ty.get()
    }

    #[inline]
    pub fn is_data_member(&self) -> bool {
        self.data_member
    }
}

/// The shape of a struct with named members.
///
/// A struct is built either by its default constructor followed by member
/// assignment, or by its member constructor, which takes one value per
/// member in declaration order.
pub struct StructShape {
    members: Vec<MemberInfo>,
    anonymous: bool,
    data_contract: bool,
    open: bool,
    default: Option<fn() -> Box<dyn Reflect>>,
    from_members: Option<fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>>,
}

impl StructShape {
    pub fn new(members: Vec<MemberInfo>) -> Self {
        Self {
            members,
            anonymous: false,
            data_contract: false,
            open: false,
            default: None,
            from_members: None,
        }
    }

    #[inline]
    pub fn with_default(mut self, default: fn() -> Box<dyn Reflect>) -> Self {
        self.default = Some(default);
        self
    }

    #[inline]
    pub fn with_from_members(
        mut self,
        from_members: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        self.from_members = Some(from_members);
        self
    }

    /// Values of an anonymous struct are matched by member names.
    #[inline]
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Only members marked [`MemberInfo::data_member`] take part in
    /// data-contract mapping.
    #[inline]
    pub fn data_contract(mut self) -> Self {
        self.data_contract = true;
        self
    }

    /// An open struct accepts members it does not declare.
    #[inline]
    pub fn open(mut self) -> Self {
        self.open = true;
        self
    }

    #[inline]
    pub fn members(&self) -> &[MemberInfo] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&MemberInfo> {
        self.members.iter().find(|member| member.name() == name)
    }

    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    #[inline]
    pub fn is_data_contract(&self) -> bool {
        self.data_contract
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `true` if the struct can be default-constructed.
    #[inline]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[inline]
    pub fn build_default(&self) -> Option<Box<dyn Reflect>> {
        self.default.map(|default| default())
    }

    /// Builds the struct from one value per member.
    ///
    /// The outer `None` means the struct has no member constructor.
    #[inline]
    pub fn build_from_members(
        &self,
        values: Vec<Box<dyn Reflect>>,
    ) -> Option<Option<Box<dyn Reflect>>> {
        self.from_members.map(|from_members| from_members(values))
    }

    #[inline]
    pub fn has_member_constructor(&self) -> bool {
        self.from_members.is_some()
    }
}

// -----------------------------------------------------------------------------
// Collection

/// The concrete kind of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Array,
    List,
    Queue,
    LinkedList,
    HashSet,
    SortedSet,
}

pub struct CollectionShape {
    kind: CollectionKind,
    item: TypeRef,
    build: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
}

impl CollectionShape {
    #[inline]
    pub fn new(
        kind: CollectionKind,
        item: TypeRef,
        build: fn(Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self { kind, item, build }
    }

    #[inline]
    pub fn kind(&self) -> CollectionKind {
        self.kind
    }

    #[inline]
    pub fn item(&self) -> Arc<TypeHandle> {
        self.item.get()
    }

    #[inline]
    pub fn build(&self, items: Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>> {
        (self.build)(items)
    }
}

// -----------------------------------------------------------------------------
// Map

pub struct MapShape {
    sorted: bool,
    key: TypeRef,
    value: TypeRef,
    build: fn(Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>) -> Option<Box<dyn Reflect>>,
}

impl MapShape {
    #[inline]
    pub fn new(
        sorted: bool,
        key: TypeRef,
        value: TypeRef,
        build: fn(Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            sorted,
            key,
            value,
            build,
        }
    }

    #[inline]
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    #[inline]
    pub fn key(&self) -> Arc<TypeHandle> {
        self.key.get()
    }

    #[inline]
    pub fn value(&self) -> Arc<TypeHandle> {
        self.value.get()
    }

    #[inline]
    pub fn build(
        &self,
        entries: Vec<(Box<dyn Reflect>, Box<dyn Reflect>)>,
    ) -> Option<Box<dyn Reflect>> {
        (self.build)(entries)
    }
}

// -----------------------------------------------------------------------------
// Pair

pub struct PairShape {
    key: TypeRef,
    value: TypeRef,
    build: fn(Box<dyn Reflect>, Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
}

impl PairShape {
    #[inline]
    pub fn new(
        key: TypeRef,
        value: TypeRef,
        build: fn(Box<dyn Reflect>, Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self { key, value, build }
    }

    #[inline]
    pub fn key(&self) -> Arc<TypeHandle> {
        self.key.get()
    }

    #[inline]
    pub fn value(&self) -> Arc<TypeHandle> {
        self.value.get()
    }

    #[inline]
    pub fn build(&self, key: Box<dyn Reflect>, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.build)(key, value)
    }
}

// -----------------------------------------------------------------------------
// Grouping

pub struct GroupingShape {
    key: TypeRef,
    element: TypeRef,
    build: fn(Box<dyn Reflect>, Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
}

impl GroupingShape {
    #[inline]
    pub fn new(
        key: TypeRef,
        element: TypeRef,
        build: fn(Box<dyn Reflect>, Vec<Box<dyn Reflect>>) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            key,
            element,
            build,
        }
    }

    #[inline]
    pub fn key(&self) -> Arc<TypeHandle> {
        self.key.get()
    }

    #[inline]
    pub fn element(&self) -> Arc<TypeHandle> {
        self.element.get()
    }

    #[inline]
    pub fn build(
        &self,
        key: Box<dyn Reflect>,
        elements: Vec<Box<dyn Reflect>>,
    ) -> Option<Box<dyn Reflect>> {
        (self.build)(key, elements)
    }
}

// -----------------------------------------------------------------------------
// Shared

/// The shape of a reference-counted wrapper.
///
/// `share` clones the wrapper itself (not the value inside), which is how
/// the mapper hands the same allocation to every place that refers to it.
pub struct SharedShape {
    inner: TypeRef,
    interior_mutable: bool,
    wrap: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
    share: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>,
}

impl SharedShape {
    #[inline]
    pub fn new(
        inner: TypeRef,
        interior_mutable: bool,
        wrap: fn(Box<dyn Reflect>) -> Option<Box<dyn Reflect>>,
        share: fn(&dyn Reflect) -> Option<Box<dyn Reflect>>,
    ) -> Self {
        Self {
            inner,
            interior_mutable,
            wrap,
            share,
        }
    }

    #[inline]
    pub fn inner(&self) -> Arc<TypeHandle> {
        self.inner.get()
    }

    /// Returns `true` if the wrapped value can be populated after wrapping.
    #[inline]
    pub fn is_interior_mutable(&self) -> bool {
        self.interior_mutable
    }

    #[inline]
    pub fn wrap(&self, value: Box<dyn Reflect>) -> Option<Box<dyn Reflect>> {
        (self.wrap)(value)
    }

    #[inline]
    pub fn share(&self, wrapper: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        (self.share)(wrapper)
    }
}
