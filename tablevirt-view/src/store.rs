use alloc::string::String;

use tablevirt::Offset;

use crate::key::{KeyMap, TableKey};

/// Last known scroll offsets of one table view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub top: Offset,
    pub left: Offset,
}

impl ScrollPosition {
    pub const ORIGIN: Self = Self { top: 0, left: 0 };

    pub fn new(top: Offset, left: Offset) -> Self {
        Self { top, left }
    }
}

/// Scroll positions keyed by logical table identity.
///
/// A table view saves its offsets here on scroll and restores them when it is re-mounted or its
/// data is refreshed, so the user's viewport survives re-rendering.
///
/// The store is owned by the caller and handed to each table explicitly. Every table sharing a
/// store must use a distinct key; two tables with the same key overwrite each other's position.
///
/// There is no automatic eviction. An entry lives until [`Self::clear`] (or
/// [`Self::clear_all`]) removes it, so callers must clear the key of a table they tear down or
/// the entry stays for the lifetime of the store.
#[derive(Clone, Debug)]
pub struct ScrollPositionStore<K = String> {
    positions: KeyMap<K, ScrollPosition>,
}

impl<K: TableKey> Default for ScrollPositionStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TableKey> ScrollPositionStore<K> {
    pub fn new() -> Self {
        Self {
            positions: KeyMap::new(),
        }
    }

    pub fn save(&mut self, key: K, top: Offset, left: Offset) {
        self.positions.insert(key, ScrollPosition { top, left });
    }

    /// Returns the saved position for `key`, or [`ScrollPosition::ORIGIN`] if there is none.
    pub fn restore(&self, key: &K) -> ScrollPosition {
        self.get(key).unwrap_or(ScrollPosition::ORIGIN)
    }

    pub fn get(&self, key: &K) -> Option<ScrollPosition> {
        self.positions.get(key).copied()
    }

    /// Forgets the position for `key`, returning it if one was saved.
    pub fn clear(&mut self, key: &K) -> Option<ScrollPosition> {
        self.positions.remove(key)
    }

    pub fn clear_all(&mut self) {
        self.positions.clear();
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
