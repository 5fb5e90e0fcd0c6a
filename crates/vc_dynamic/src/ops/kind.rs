use core::fmt;

use crate::Reflect;
use crate::object::Value;
use crate::ops::{Collection, Enum, Grouping, Map, Pair, Shared, Struct};

// -----------------------------------------------------------------------------
// ReflectKind

/// The kinds of values the mapper distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Scalar,
    Enum,
    Option,
    Struct,
    Collection,
    Map,
    Pair,
    Grouping,
    Shared,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Option => "option",
            Self::Struct => "struct",
            Self::Collection => "collection",
            Self::Map => "map",
            Self::Pair => "pair",
            Self::Grouping => "grouping",
            Self::Shared => "shared",
        };
        f.write_str(name)
    }
}

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable, kind-specific view of a value.
///
/// Scalars are handed out by value, already converted into a [`Value`].
pub enum ReflectRef<'a> {
    Scalar(Value),
    Enum(&'a dyn Enum),
    Option(Option<&'a dyn Reflect>),
    Struct(&'a dyn Struct),
    Collection(&'a dyn Collection),
    Map(&'a dyn Map),
    Pair(&'a dyn Pair),
    Grouping(&'a dyn Grouping),
    Shared(&'a dyn Shared),
}

impl ReflectRef<'_> {
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
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable, kind-specific view of a value.
///
/// Only structs are populated in place; every other kind is rebuilt as a
/// whole through its [`TypeShape`](crate::handle::TypeShape).
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    Opaque,
}
