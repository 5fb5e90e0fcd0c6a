//! [`FixedHasher`] and [`NoOpHasher`].
//!
//! `FixedHasher` wraps *foldhash* with a constant seed. `NoOpHasher` takes a
//! single `u64` write as the hash, which is all a [`TypeId`](core::any::TypeId)
//! or an object address needs.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

const FIXED_SEED: FixedState = FixedState::with_seed(0x95EE04C4F326B271);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// Build-hasher with a seed that never changes between runs.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use vc_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("Name"), FixedHashState.hash_one("Name"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_SEED.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// NoOpHasher

/// Hasher that passes a written `u64` straight through.
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHasher {
    hash: u64,
}

impl Hasher for NoOpHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for byte in bytes.iter().rev() {
            self.hash = self.hash.rotate_left(8).wrapping_add(*byte as u64);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.hash = i as u64;
    }
}

/// Build-hasher for keys that are already well distributed.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use vc_utils::hash::NoOpHashState;
///
/// let mut hasher = NoOpHashState.build_hasher();
/// 42_u64.hash(&mut hasher);
/// assert_eq!(hasher.finish(), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct NoOpHashState;

impl BuildHasher for NoOpHashState {
    type Hasher = NoOpHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        NoOpHasher { hash: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::hash::Hash;

    #[test]
    fn fixed_state_is_stable() {
        let a = FixedHashState.hash_one(("alloc::vec", "Vec"));
        let b = FixedHashState.hash_one(("alloc::vec", "Vec"));
        assert_eq!(a, b);
    }

    #[test]
    fn no_op_passes_usize_through() {
        let mut hasher = NoOpHashState.build_hasher();
        0x1000_usize.hash(&mut hasher);
        assert_eq!(hasher.finish(), 0x1000);
    }
}
