use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use vc_utils::hash::HashSet;

use crate::info::ScalarKind;
use crate::object::DynamicObject;

// -----------------------------------------------------------------------------
// Value

/// The payload of a property.
///
/// Scalars keep their exact Rust width so the receiving side can rebuild the
/// same type; [`Value::coerce`] converts between widths when that loses
/// nothing.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{info::ScalarKind, object::Value};
///
/// let value = Value::from(300_i64);
/// assert_eq!(value.coerce(ScalarKind::U16), Some(Value::U16(300)));
/// assert_eq!(value.coerce(ScalarKind::U8), None);
/// assert_eq!(value.coerce(ScalarKind::F32), Some(Value::F32(300.0)));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Char(char),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    F32(f32),
    F64(f64),
    String(String),
    Array(Vec<Value>),
    Object(DynamicObject),
}

/// The coarse kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Scalar(ScalarKind),
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Scalar(kind) => kind.fmt(f),
            Self::Array => f.write_str("array"),
            Self::Object => f.write_str("object"),
        }
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        let scalar = match self {
            Self::Null => return ValueKind::Null,
            Self::Array(_) => return ValueKind::Array,
            Self::Object(_) => return ValueKind::Object,
            Self::Bool(_) => ScalarKind::Bool,
            Self::Char(_) => ScalarKind::Char,
            Self::I8(_) => ScalarKind::I8,
            Self::I16(_) => ScalarKind::I16,
            Self::I32(_) => ScalarKind::I32,
            Self::I64(_) => ScalarKind::I64,
            Self::I128(_) => ScalarKind::I128,
            Self::U8(_) => ScalarKind::U8,
            Self::U16(_) => ScalarKind::U16,
            Self::U32(_) => ScalarKind::U32,
            Self::U64(_) => ScalarKind::U64,
            Self::U128(_) => ScalarKind::U128,
            Self::F32(_) => ScalarKind::F32,
            Self::F64(_) => ScalarKind::F64,
            Self::String(_) => ScalarKind::String,
        };
        ValueKind::Scalar(scalar)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub fn as_object(&self) -> Option<&DynamicObject> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Structural equality that terminates on cyclic graphs.
    pub(crate) fn eq_in(&self, other: &Self, visited: &mut HashSet<(usize, usize)>) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Char(a), Self::Char(b)) => a == b,
            (Self::I8(a), Self::I8(b)) => a == b,
            (Self::I16(a), Self::I16(b)) => a == b,
            (Self::I32(a), Self::I32(b)) => a == b,
            (Self::I64(a), Self::I64(b)) => a == b,
            (Self::I128(a), Self::I128(b)) => a == b,
            (Self::U8(a), Self::U8(b)) => a == b,
            (Self::U16(a), Self::U16(b)) => a == b,
            (Self::U32(a), Self::U32(b)) => a == b,
            (Self::U64(a), Self::U64(b)) => a == b,
            (Self::U128(a), Self::U128(b)) => a == b,
            (Self::F32(a), Self::F32(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.eq_in(b, visited))
            }
            (Self::Object(a), Self::Object(b)) => a.eq_in(b, visited),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eq_in(other, &mut HashSet::default())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => write!(f, "Bool({v})"),
            Self::Char(v) => write!(f, "Char({v:?})"),
            Self::I8(v) => write!(f, "I8({v})"),
            Self::I16(v) => write!(f, "I16({v})"),
            Self::I32(v) => write!(f, "I32({v})"),
            Self::I64(v) => write!(f, "I64({v})"),
            Self::I128(v) => write!(f, "I128({v})"),
            Self::U8(v) => write!(f, "U8({v})"),
            Self::U16(v) => write!(f, "U16({v})"),
            Self::U32(v) => write!(f, "U32({v})"),
            Self::U64(v) => write!(f, "U64({v})"),
            Self::U128(v) => write!(f, "U128({v})"),
            Self::F32(v) => write!(f, "F32({v:?})"),
            Self::F64(v) => write!(f, "F64({v:?})"),
            Self::String(v) => write!(f, "String({v:?})"),
            Self::Array(items) => f.debug_list().entries(items).finish(),
            Self::Object(object) => fmt::Debug::fmt(object, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    String => String,
    DynamicObject => Object,
}

impl From<isize> for Value {
    #[inline]
    fn from(value: isize) -> Self {
        Self::I64(value as i64)
    }
}

impl From<usize> for Value {
    #[inline]
    fn from(value: usize) -> Self {
        Self::U64(value as u64)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<()> for Value {
    #[inline]
    fn from(_: ()) -> Self {
        Self::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn kinds() {
        assert_eq!(Value::from(1_u8).kind(), ValueKind::Scalar(ScalarKind::U8));
        assert_eq!(Value::from("x").kind(), ValueKind::Scalar(ScalarKind::String));
        assert_eq!(Value::from(vec![1, 2]).kind(), ValueKind::Array);
        assert_eq!(Value::from(None::<i32>).kind(), ValueKind::Null);
        assert_eq!(ValueKind::Array.to_string(), "array");
    }

    #[test]
    fn equality_is_strict_about_width() {
        assert_eq!(Value::from(1_i32), Value::I32(1));
        assert_ne!(Value::from(1_i32), Value::I64(1));
        assert_eq!(
            Value::from(vec!["a", "b"]),
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
    }
}
