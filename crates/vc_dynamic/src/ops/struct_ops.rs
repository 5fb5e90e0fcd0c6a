use alloc::boxed::Box;
use core::iter::FusedIterator;

use crate::Reflect;

/// A value with named members.
///
/// Member names are the names used on the wire, after any
/// `#[reflect(rename = "..")]`.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{Reflect, derive::Reflect, ops::{ReflectRef, Struct}};
///
/// #[derive(Reflect, Default)]
/// #[reflect(default)]
/// struct Line {
///     sku: String,
///     quantity: u32,
/// }
///
/// let mut line = Line { sku: "A-1".into(), quantity: 2 };
/// assert_eq!(line.member_len(), 2);
/// assert_eq!(line.name_at(1), Some("quantity"));
///
/// line.set_member("quantity", Box::new(5_u32)).unwrap();
/// assert_eq!(line.quantity, 5);
/// assert!(line.set_member("quantity", Box::new(5_i64)).is_err());
///
/// let ReflectRef::Struct(view) = line.reflect_ref() else { unreachable!() };
/// let names: Vec<_> = view.iter_members().map(|(name, _)| name).collect();
/// assert_eq!(names, ["sku", "quantity"]);
/// ```
pub trait Struct: Reflect {
    /// Returns the member called `name`.
    fn member(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns the member at `index`, in declaration order.
    fn member_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns the name of the member at `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of members.
    fn member_len(&self) -> usize;

    /// Replaces the member called `name`.
    ///
    /// The value is handed back when the member does not exist or has a
    /// different type.
    fn set_member(&mut self, name: &str, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;
}

impl dyn Struct {
    /// Iterates over `(name, member)` pairs in declaration order.
    #[inline]
    pub fn iter_members(&self) -> MemberIter<'_> {
        MemberIter {
            target: self,
            index: 0,
        }
    }
}

/// Iterator over the members of a [`Struct`].
pub struct MemberIter<'a> {
    target: &'a dyn Struct,
    index: usize,
}

impl<'a> Iterator for MemberIter<'a> {
    type Item = (&'a str, &'a dyn Reflect);

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.target.name_at(self.index)?;
        let member = self.target.member_at(self.index)?;
        self.index += 1;
        Some((name, member))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.target.member_len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MemberIter<'_> {}
impl FusedIterator for MemberIter<'_> {}
