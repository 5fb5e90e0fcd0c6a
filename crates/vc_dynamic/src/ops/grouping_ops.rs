use alloc::boxed::Box;

use crate::Reflect;

/// A key together with the elements grouped under it.
pub trait Grouping: Reflect {
    fn key(&self) -> &dyn Reflect;

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;
}
