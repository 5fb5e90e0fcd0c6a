//! Hash containers built on *hashbrown* and *foldhash*.
//!
//! Every container here uses [`FixedHashState`], so iteration order only
//! depends on the inserted keys. Caches keyed by type descriptors or object
//! identities rely on that to behave the same way across runs.

// -----------------------------------------------------------------------------
// Modules

mod hasher;

// -----------------------------------------------------------------------------
// Exports

pub use hasher::{FixedHashState, FixedHasher};
pub use hasher::{NoOpHashState, NoOpHasher};

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// # Examples
///
/// ```
/// use vc_utils::hash::HashMap;
///
/// let mut map = HashMap::<&str, i32>::default();
/// map.insert("Id", 1);
/// assert_eq!(map.get("Id"), Some(&1));
/// ```
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;
