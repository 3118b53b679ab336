use alloc::vec::Vec;

/// Pixel type for a single row size.
pub type Px = u32;

/// Pixel type for offsets and cumulative sizes.
pub type Offset = u64;

/// Where a row should land when scrolling to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    /// Keep the current offset if the row is fully visible, otherwise scroll the minimum amount.
    Auto,
}

/// A measured element rectangle as reported by the rendering layer.
///
/// `main` is the size along the scroll axis (row height for vertical tables).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: Px,
    pub cross: Px,
}

/// Index range of rows, end exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}

/// Position of one row inside the total virtual content area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VirtualItem {
    pub index: usize,
    pub start: Offset,
    pub size: Px,
}

impl VirtualItem {
    pub fn end(&self) -> Offset {
        self.start.saturating_add(self.size as Offset)
    }
}

/// The rows to render for one scroll position, plus the spacing around them.
///
/// `padding_top + rendered_size() + padding_bottom == total_size` always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Window {
    pub items: Vec<VirtualItem>,
    pub padding_top: Offset,
    pub padding_bottom: Offset,
    pub total_size: Offset,
}

impl Window {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn first_index(&self) -> Option<usize> {
        self.items.first().map(|it| it.index)
    }

    pub fn last_index(&self) -> Option<usize> {
        self.items.last().map(|it| it.index)
    }

    /// Index range covered by `items`, end exclusive.
    pub fn range(&self) -> VisibleRange {
        match (self.first_index(), self.last_index()) {
            (Some(start_index), Some(last)) => VisibleRange {
                start_index,
                end_index: last + 1,
            },
            _ => VisibleRange::EMPTY,
        }
    }

    /// Sum of the sizes of the rendered rows.
    pub fn rendered_size(&self) -> Offset {
        self.items.iter().map(|it| it.size as Offset).sum()
    }
}
