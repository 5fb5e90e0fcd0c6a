use core::fmt;

use crate::info::TypeInfo;

/// The scalar types a [`Value`](crate::object::Value) can be coerced into.
///
/// Each kind corresponds to exactly one Rust type, and its descriptor is the
/// descriptor that type reports through [`TypeInfo::of`].
///
/// # Examples
///
/// ```
/// use vc_dynamic::info::{ScalarKind, TypeInfo};
///
/// assert_eq!(ScalarKind::I32.type_info(), TypeInfo::of::<i32>());
/// assert_eq!(
///     ScalarKind::from_type_info(&TypeInfo::of::<String>()),
///     Some(ScalarKind::String),
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Unit,
    Bool,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    String,
}

const STRING_NAMESPACE: &str = "alloc::string";

impl ScalarKind {
    /// The short Rust name of the type.
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::Unit => "()",
            Self::Bool => "bool",
            Self::Char => "char",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::I128 => "i128",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::U128 => "u128",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::String => "String",
        }
    }

    /// Returns the descriptor of the corresponding Rust type.
    pub fn type_info(self) -> TypeInfo {
        let info = TypeInfo::new(self.type_name());
        match self {
            Self::String => info.with_namespace(STRING_NAMESPACE),
            _ => info,
        }
    }

    /// Maps a descriptor back to a scalar kind.
    ///
    /// Returns `None` for anything that is not one of the scalar types.
    pub fn from_type_info(info: &TypeInfo) -> Option<Self> {
        if info.is_generic() || info.is_array() {
            return None;
        }
        let kind = match info.name() {
            "()" => Self::Unit,
            "bool" => Self::Bool,
            "char" => Self::Char,
            "i8" => Self::I8,
            "i16" => Self::I16,
            "i32" => Self::I32,
            "i64" => Self::I64,
            "i128" => Self::I128,
            "isize" => Self::Isize,
            "u8" => Self::U8,
            "u16" => Self::U16,
            "u32" => Self::U32,
            "u64" => Self::U64,
            "u128" => Self::U128,
            "usize" => Self::Usize,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "String" => Self::String,
            _ => return None,
        };
        let expected = match kind {
            Self::String => Some(STRING_NAMESPACE),
            _ => None,
        };
        (info.namespace() == expected).then_some(kind)
    }

    #[inline]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::I128
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::U128
                | Self::Usize
        )
    }

    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::ScalarKind;
    use crate::info::TypeInfo;

    #[test]
    fn namespace_must_match() {
        let foreign = TypeInfo::new("String").with_namespace("my::strings");
        assert_eq!(ScalarKind::from_type_info(&foreign), None);
        assert_eq!(
            ScalarKind::from_type_info(&TypeInfo::new("u16")),
            Some(ScalarKind::U16)
        );
        assert_eq!(
            ScalarKind::from_type_info(&TypeInfo::new("i32").with_namespace("core")),
            None
        );
    }
}
