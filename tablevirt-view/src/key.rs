#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for logical table keys: `Hash + Eq` with `std`, `Ord` without.
#[cfg(feature = "std")]
pub trait TableKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<T: core::hash::Hash + Eq> TableKey for T {}

/// Bound for logical table keys: `Hash + Eq` with `std`, `Ord` without.
#[cfg(not(feature = "std"))]
pub trait TableKey: Ord {}
#[cfg(not(feature = "std"))]
impl<T: Ord> TableKey for T {}
