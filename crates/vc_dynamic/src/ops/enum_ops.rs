use crate::Reflect;

/// A fieldless enum.
///
/// Variants are identified by name or by their integer discriminant.
pub trait Enum: Reflect {
    /// The name of the current variant.
    fn variant_name(&self) -> &str;

    /// The index of the current variant, in declaration order.
    fn variant_index(&self) -> usize;

    /// The discriminant of the current variant.
    fn discriminant(&self) -> i64;
}
