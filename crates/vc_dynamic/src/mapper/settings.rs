use serde::{Deserialize, Serialize};

/// How enum values are written into dynamic objects.
///
/// Reading accepts both forms regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnumFormat {
    /// The variant name, as a string.
    #[default]
    Name,
    /// The discriminant, as an `i64`.
    Value,
}

/// Runtime options of a [`DynamicObjectMapper`](super::DynamicObjectMapper).
///
/// Only plain data lives here. The member provider is a type parameter of
/// the mapper, set with
/// [`with_member_provider`](super::DynamicObjectMapper::with_member_provider).
/// Candidate namespaces and the record fallback belong to the resolver, see
/// [`DefaultTypeResolver`](crate::resolver::DefaultTypeResolver).
///
/// Settings can be loaded from any serde format:
///
/// ```
/// use vc_dynamic::mapper::{EnumFormat, MapperSettings};
///
/// let settings: MapperSettings = ron::from_str("(enum_format: Value)").unwrap();
/// assert_eq!(settings.enum_format, EnumFormat::Value);
/// assert_eq!(ron::from_str::<MapperSettings>("()").unwrap(), MapperSettings::default());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[non_exhaustive]
pub struct MapperSettings {
    pub enum_format: EnumFormat,
}

impl MapperSettings {
    #[inline]
    pub fn with_enum_format(mut self, enum_format: EnumFormat) -> Self {
        self.enum_format = enum_format;
        self
    }
}
