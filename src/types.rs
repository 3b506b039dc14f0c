/// Pins the viewport's top or bottom edge when recomputing the window.
///
/// Exactly one row drives the placement: either the row at the viewport top
/// (with an optional pixel shift) or the row whose bottom edge sits at the
/// viewport bottom. The equivalent forward index/offset pair for a [`Self::Last`]
/// anchor is derived from current row heights during the computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAnchor {
    /// Row `index` sits at the viewport top, shifted by `offset` pixels.
    ///
    /// `offset` is normally `<= 0`: the row's top edge is that many pixels
    /// above the viewport top (the row is partially scrolled out).
    First { index: usize, offset: i64 },
    /// Row `index` sits at the viewport bottom.
    Last { index: usize },
}

impl ScrollAnchor {
    /// Anchors row `index` flush with the viewport top.
    pub fn first(index: usize) -> Self {
        Self::First { index, offset: 0 }
    }

    /// Anchors row `index` at the viewport top, shifted by `offset` pixels.
    pub fn first_with_offset(index: usize, offset: i64) -> Self {
        Self::First { index, offset }
    }

    /// Anchors row `index` at the viewport bottom.
    pub fn last(index: usize) -> Self {
        Self::Last { index }
    }
}

/// An ascending, contiguous run of row indices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl RowRange {
    pub(crate) const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start_index..self.end_index
    }
}

/// One materialized row in a computed window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowRow {
    pub index: usize,
    /// Pixel offset of the row's top edge from the start of the list.
    pub offset: u64,
    /// Stored height of the row (row height plus its sub-row height).
    pub height: u32,
    /// Reusable slot id assigned to this row, in `[0, pool_size)`.
    pub slot: usize,
}

impl WindowRow {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.height as u64)
    }
}
