use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One step of a [`MemberPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// The short name of the type being built.
    Root(String),
    Member(String),
    Index(usize),
}

/// Where in an object graph a mapping error happened.
///
/// Displays as `Order.lines[2].sku`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MemberPath {
    segments: Vec<PathSegment>,
}

impl MemberPath {
    #[inline]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn root(type_name: impl Into<String>) -> Self {
        Self {
            segments: alloc::vec![PathSegment::Root(type_name.into())],
        }
    }

    #[inline]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn push_member(&mut self, name: impl Into<String>) {
        self.segments.push(PathSegment::Member(name.into()));
    }

    #[inline]
    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    #[inline]
    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }
}

impl fmt::Display for MemberPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Root(name) => f.write_str(name)?,
                PathSegment::Member(name) if index == 0 => f.write_str(name)?,
                PathSegment::Member(name) => write!(f, ".{name}")?,
                PathSegment::Index(item) => write!(f, "[{item}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::MemberPath;

    #[test]
    fn display() {
        let mut path = MemberPath::root("Order");
        path.push_member("lines");
        path.push_index(2);
        path.push_member("sku");
        assert_eq!(path.to_string(), "Order.lines[2].sku");

        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "Order.lines");

        let mut relative = MemberPath::new();
        relative.push_member("Key");
        assert_eq!(relative.to_string(), "Key");
    }
}
