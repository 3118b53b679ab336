use alloc::vec::Vec;
use core::cmp;

/// Cumulative row offsets backed by a Fenwick tree.
///
/// `offset_of(i)` is the sum of the sizes of rows `0..i`, i.e. the start of row `i` when every
/// row is laid out end-to-end. Point updates and offset lookups are `O(log n)`.
#[derive(Clone, Debug, Default)]
pub(crate) struct PrefixOffsets {
    tree: Vec<u64>, // 1-indexed
    total: u64,
    top_bit: usize,
}

impl PrefixOffsets {
    /// Builds the tree from per-row sizes in `O(n)`.
    pub(crate) fn build(sizes: &[u32]) -> Self {
        let n = sizes.len();
        let mut tree = alloc::vec![0u64; n + 1];
        let mut total = 0u64;
        for i in 1..=n {
            let size = sizes[i - 1] as u64;
            total = total.saturating_add(size);
            tree[i] = tree[i].saturating_add(size);
            let parent = i + lsb(i);
            if parent <= n {
                tree[parent] = tree[parent].saturating_add(tree[i]);
            }
        }
        Self {
            tree,
            total,
            top_bit: top_bit(n),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.tree.len().saturating_sub(1)
    }

    pub(crate) fn total(&self) -> u64 {
        self.total
    }

    /// Adds `delta` to the size of row `index`. Out-of-range indexes are ignored.
    pub(crate) fn apply_delta(&mut self, index: usize, delta: i64) {
        let n = self.len();
        if index >= n || delta == 0 {
            return;
        }
        if delta > 0 {
            self.total = self.total.saturating_add(delta as u64);
        } else {
            self.total = self.total.saturating_sub(delta.unsigned_abs());
        }
        let mut i = index + 1;
        while i <= n {
            let next = self.tree[i] as i128 + delta as i128;
            debug_assert!(next >= 0, "prefix offsets underflow (node={i}, delta={delta})");
            self.tree[i] = next.clamp(0, u64::MAX as i128) as u64;
            i += lsb(i);
        }
    }

    /// Start offset of row `index` (the sum of all sizes before it).
    ///
    /// `offset_of(len())` equals `total()`.
    pub(crate) fn offset_of(&self, index: usize) -> u64 {
        let mut i = cmp::min(index, self.len());
        let mut sum = 0u64;
        while i > 0 {
            sum = sum.saturating_add(self.tree[i]);
            i &= i - 1;
        }
        sum
    }

    /// Number of leading rows whose cumulative end is `<= offset`.
    ///
    /// For an offset inside the content this is the index of the row covering it; zero-sized
    /// rows at that boundary are skipped past.
    pub(crate) fn rows_ending_at_or_before(&self, mut offset: u64) -> usize {
        let n = self.len();
        let mut idx = 0usize;
        let mut bit = self.top_bit;
        while bit != 0 {
            let next = idx + bit;
            if next <= n && self.tree[next] <= offset {
                offset -= self.tree[next];
                idx = next;
            }
            bit >>= 1;
        }
        idx
    }
}

fn lsb(i: usize) -> usize {
    i & i.wrapping_neg()
}

fn top_bit(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    1usize << (usize::BITS - 1 - n.leading_zeros())
}
