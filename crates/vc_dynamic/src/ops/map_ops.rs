use alloc::boxed::Box;

use crate::Reflect;

/// A dictionary.
pub trait Map: Reflect {
    fn len(&self) -> usize;

    /// Iterates over `(key, value)` entries.
    fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A key/value pair, mapped to an object with exactly `Key` and `Value`.
pub trait Pair: Reflect {
    fn key(&self) -> &dyn Reflect;

    fn value(&self) -> &dyn Reflect;
}
