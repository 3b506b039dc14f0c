use alloc::vec::Vec;
use core::cmp;

use crate::WindowOptions;
use crate::offset_tree::OffsetTree;
use crate::slots::SlotAllocator;
use crate::types::{RowRange, ScrollAnchor, WindowRow};

/// State snapshot for a virtualized row list.
///
/// Holds the buffered row range with per-row cumulative offsets, the scroll
/// metrics, and the two structures that persist across events: the offset
/// tree (stored heights plus prefix sums) and the slot allocator. Created
/// once per list via [`WindowState::new`] and threaded by value through
/// [`WindowState::compute`] on every scroll, resize, or data-change event.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    rows: RowRange,
    offsets: Vec<u64>,
    row_slots: Vec<usize>,
    scroll_y: u64,
    max_scroll_y: u64,
    content_height: u64,
    first_row_index: usize,
    first_row_offset: i64,
    tree: OffsetTree,
    slots: SlotAllocator,
}

impl WindowState {
    /// Creates the initial state for `options.row_count` rows, seeding every
    /// row's height with `options.default_row_height`.
    pub fn new(options: &WindowOptions) -> Self {
        wdebug!(
            row_count = options.row_count,
            default_row_height = options.default_row_height,
            "WindowState::new"
        );
        Self {
            rows: RowRange::EMPTY,
            offsets: Vec::new(),
            row_slots: Vec::new(),
            scroll_y: 0,
            max_scroll_y: 0,
            content_height: 0,
            first_row_index: 0,
            first_row_offset: 0,
            tree: OffsetTree::uniform(options.row_count, options.default_row_height),
            slots: SlotAllocator::new(0),
        }
    }

    /// The buffered row range materialized by the last [`Self::compute`].
    pub fn rows(&self) -> RowRange {
        self.rows
    }

    pub fn scroll_y(&self) -> u64 {
        self.scroll_y
    }

    pub fn max_scroll_y(&self) -> u64 {
        self.max_scroll_y
    }

    /// Total pixel height of all rows combined.
    pub fn content_height(&self) -> u64 {
        self.content_height
    }

    /// The row at the viewport top after the last computation.
    pub fn first_row_index(&self) -> usize {
        self.first_row_index
    }

    /// Pixel shift of the first row relative to the viewport top, `<= 0` when
    /// the row is partially scrolled out above it.
    pub fn first_row_offset(&self) -> i64 {
        self.first_row_offset
    }

    pub fn tree(&self) -> &OffsetTree {
        &self.tree
    }

    pub fn slots(&self) -> &SlotAllocator {
        &self.slots
    }

    /// Cumulative pixel offset of row `index`, if it is materialized.
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        self.rows
            .contains(index)
            .then(|| self.offsets[index - self.rows.start_index])
    }

    /// Slot id for row `index`, if it is materialized.
    pub fn slot_of(&self, index: usize) -> Option<usize> {
        self.slots.position_of(index)
    }

    /// Stored height of row `index`, if `index` is within the row count.
    pub fn height_of(&self, index: usize) -> Option<u32> {
        (index < self.tree.len()).then(|| self.tree.get(index))
    }

    /// Iterates over the materialized rows in ascending order without
    /// allocating.
    pub fn for_each_row(&self, mut f: impl FnMut(WindowRow)) {
        for (i, index) in self.rows.iter().enumerate() {
            f(WindowRow {
                index,
                offset: self.offsets[i],
                height: self.tree.get(index),
                slot: self.row_slots[i],
            });
        }
    }

    /// Collects the materialized rows into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_row`]; prefer the iteration
    /// form and a reused scratch buffer in hot paths.
    pub fn collect_rows(&self, out: &mut Vec<WindowRow>) {
        out.clear();
        self.for_each_row(|row| out.push(row));
    }

    /// Recomputes the window for one scroll/resize/data-change event.
    ///
    /// Consumes the previous state and returns the updated snapshot:
    /// - resolves `anchor` to a forward (row, sub-offset) pair, clamping
    ///   anchors past the end onto the tail of the list,
    /// - expands to the visible range and widens it by
    ///   `options.buffer_row_count` on each side,
    /// - re-measures rows entering the buffered range through the height
    ///   getters,
    /// - recomputes the scroll metrics against the updated heights,
    /// - releases slots of departed rows and binds slots for entrants.
    ///
    /// Cost per call is `O((buffer + visible) * log row_count)`, independent
    /// of the list size outside the buffered range. Changing
    /// `options.row_count` triggers an `O(row_count)` rebuild of the tree and
    /// drops all slot bindings.
    pub fn compute(mut self, anchor: ScrollAnchor, options: &WindowOptions) -> Self {
        let row_count = options.row_count;
        wtrace!(
            ?anchor,
            row_count,
            viewport_height = options.viewport_height,
            "compute window"
        );

        if self.tree.len() != row_count {
            self.rebuild(row_count, options.default_row_height);
        }

        if row_count == 0 {
            // Empty data set: nothing to materialize, no scrollable extent.
            self.rows = RowRange::EMPTY;
            self.offsets.clear();
            self.row_slots.clear();
            self.scroll_y = 0;
            self.max_scroll_y = 0;
            self.content_height = 0;
            self.first_row_index = 0;
            self.first_row_offset = 0;
            return self;
        }

        let viewport = options.viewport_height as u64;

        // Resolve the anchor to a forward (row, sub-offset) pair.
        let (first, first_offset) = match anchor {
            ScrollAnchor::First { index, offset } => {
                if index >= row_count {
                    wwarn!(index, row_count, "first anchor beyond row count");
                }
                (cmp::min(index, row_count - 1), offset)
            }
            ScrollAnchor::Last { index } => {
                if index >= row_count {
                    wwarn!(index, row_count, "last anchor beyond row count");
                }
                self.backward_anchor(cmp::min(index, row_count - 1), viewport)
            }
        };

        // Clamp the raw scroll position against current metrics, re-deriving
        // the anchor through the inverse query when clamping moved it. This is
        // what lands an out-of-range anchor on the tail of the list.
        let (scroll_y, first, first_offset) = self.clamp_anchor(first, first_offset, viewport);

        let range = self.buffered_range(scroll_y, viewport, options.buffer_row_count, row_count);

        // Lazily re-measure rows entering the window; rows carried over keep
        // their stored height. `set` is a no-op for unchanged heights.
        let previous = self.rows;
        for index in range.iter() {
            if previous.contains(index) {
                continue;
            }
            let height =
                (options.row_height)(index).saturating_add((options.sub_row_height)(index));
            self.tree.set(index, height);
        }

        // Cumulative offsets per buffered row, against the updated heights.
        self.offsets.clear();
        for index in range.iter() {
            self.offsets.push(self.tree.sum_until(index));
        }

        // Scroll metrics may have shifted if entering rows were re-measured;
        // clamp again so the returned anchor stays consistent with them.
        let content_height = self.tree.total();
        let (scroll_y, first, first_offset) = self.clamp_anchor(first, first_offset, viewport);

        self.reconcile_slots(range);

        self.rows = range;
        self.scroll_y = scroll_y;
        self.max_scroll_y = content_height.saturating_sub(viewport);
        self.content_height = content_height;
        self.first_row_index = first;
        self.first_row_offset = first_offset;
        self
    }

    /// Rebuilds the offset tree for a new row count, preserving stored
    /// heights for surviving rows, and drops all slot bindings.
    fn rebuild(&mut self, row_count: usize, default_row_height: u32) {
        wdebug!(
            old_row_count = self.tree.len(),
            new_row_count = row_count,
            "rebuilding offset tree"
        );
        let keep = cmp::min(self.tree.len(), row_count);
        let mut heights = Vec::with_capacity(row_count);
        heights.extend_from_slice(&self.tree.heights()[..keep]);
        heights.resize(row_count, default_row_height);
        self.tree = OffsetTree::from_heights(&heights);
        self.slots.clear();
    }

    /// Resolves a bottom anchor: the equivalent forward pair for "row `last`'s
    /// bottom edge sits at the viewport bottom".
    fn backward_anchor(&self, last: usize, viewport: u64) -> (usize, i64) {
        let bottom = self.tree.sum_until(last + 1);
        self.locate(bottom.saturating_sub(viewport))
    }

    /// The row containing `scroll_y` and its sub-offset (`<= 0`).
    fn locate(&self, scroll_y: u64) -> (usize, i64) {
        let index = self.tree.index_at(scroll_y);
        let offset = (self.tree.sum_until(index) as i128 - scroll_y as i128) as i64;
        (index, offset)
    }

    /// Scroll position for a forward anchor, clamped into `[0, max_scroll_y]`
    /// under the tree's current heights. When clamping moves the position, the
    /// anchor is re-derived so it stays consistent with the returned value.
    fn clamp_anchor(&self, first: usize, first_offset: i64, viewport: u64) -> (u64, usize, i64) {
        let raw = self.tree.sum_until(first) as i128 - first_offset as i128;
        let max = self.tree.total().saturating_sub(viewport);
        let clamped = raw.clamp(0, max as i128);
        if clamped == raw {
            (clamped as u64, first, first_offset)
        } else {
            let (first, first_offset) = self.locate(clamped as u64);
            (clamped as u64, first, first_offset)
        }
    }

    /// Visible rows for `scroll_y`, widened by `buffer` rows on each side and
    /// clipped to `[0, row_count)`.
    fn buffered_range(
        &self,
        scroll_y: u64,
        viewport: u64,
        buffer: usize,
        row_count: usize,
    ) -> RowRange {
        if viewport == 0 {
            return RowRange::EMPTY;
        }
        let start = self.tree.index_at(scroll_y);
        let end_inclusive = scroll_y.saturating_add(viewport).saturating_sub(1);
        let end = self
            .tree
            .index_at(cmp::max(end_inclusive, scroll_y))
            .saturating_add(1);
        RowRange {
            start_index: start.saturating_sub(buffer),
            end_index: cmp::min(end.saturating_add(buffer), row_count),
        }
    }

    /// Releases slots of rows that left the buffered range, then binds a slot
    /// for every range row lacking one. Releases run first so a pool sized to
    /// the range never exhausts.
    fn reconcile_slots(&mut self, range: RowRange) {
        self.slots.ensure_capacity(range.len());

        let mut departed: Vec<usize> = Vec::new();
        self.slots.for_each_bound(|row, _| {
            if !range.contains(row) {
                departed.push(row);
            }
        });
        for row in departed {
            self.slots.release(row);
        }

        self.row_slots.clear();
        for index in range.iter() {
            let slot = self.slots.assign(index);
            self.row_slots.push(slot);
        }
    }
}
