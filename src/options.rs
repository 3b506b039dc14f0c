use alloc::sync::Arc;

/// Per-call inputs for [`crate::WindowState::compute`].
///
/// Bundles what the table layer's sizing providers produce for each scroll,
/// resize, or data-change event: the row count, the viewport height, the
/// buffer size, and the height lookups. The core never caches an options
/// value; the caller supplies a current one on every call.
///
/// This type is cheap to clone: the height getters are stored in `Arc`s, so an
/// adapter can tweak a few numeric fields per event without reallocating
/// closures.
pub struct WindowOptions {
    pub row_count: usize,
    /// Measured height for a row, in pixels.
    pub row_height: Arc<dyn Fn(usize) -> u32 + Send + Sync>,
    /// Extra height contributed by a row's expanded sub-row, summed into the
    /// row's stored height.
    pub sub_row_height: Arc<dyn Fn(usize) -> u32 + Send + Sync>,
    /// Rows kept mounted beyond the visible range on each side.
    pub buffer_row_count: usize,
    pub viewport_height: u32,
    /// Height assumed for rows that have never been measured. Seeds the
    /// offset tree when it is (re)built, so scroll metrics stay plausible for
    /// regions the window has not visited yet.
    pub default_row_height: u32,
}

impl WindowOptions {
    /// Creates options for a list whose rows are measured by `row_height`.
    ///
    /// The sub-row getter defaults to zero, the buffer to one row, and the
    /// default row height to zero. Set [`Self::with_default_row_height`] when
    /// scroll metrics should stay plausible for rows that have never been
    /// measured.
    pub fn new(
        row_count: usize,
        viewport_height: u32,
        row_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        Self {
            row_count,
            row_height: Arc::new(row_height),
            sub_row_height: Arc::new(|_| 0),
            buffer_row_count: 1,
            viewport_height,
            default_row_height: 0,
        }
    }

    pub fn with_row_count(mut self, row_count: usize) -> Self {
        self.row_count = row_count;
        self
    }

    pub fn with_sub_row_height(
        mut self,
        sub_row_height: impl Fn(usize) -> u32 + Send + Sync + 'static,
    ) -> Self {
        self.sub_row_height = Arc::new(sub_row_height);
        self
    }

    pub fn with_buffer_row_count(mut self, buffer_row_count: usize) -> Self {
        self.buffer_row_count = buffer_row_count;
        self
    }

    pub fn with_viewport_height(mut self, viewport_height: u32) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    pub fn with_default_row_height(mut self, default_row_height: u32) -> Self {
        self.default_row_height = default_row_height;
        self
    }
}

impl Clone for WindowOptions {
    fn clone(&self) -> Self {
        Self {
            row_count: self.row_count,
            row_height: Arc::clone(&self.row_height),
            sub_row_height: Arc::clone(&self.sub_row_height),
            buffer_row_count: self.buffer_row_count,
            viewport_height: self.viewport_height,
            default_row_height: self.default_row_height,
        }
    }
}

impl core::fmt::Debug for WindowOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("row_count", &self.row_count)
            .field("buffer_row_count", &self.buffer_row_count)
            .field("viewport_height", &self.viewport_height)
            .field("default_row_height", &self.default_row_height)
            .finish_non_exhaustive()
    }
}
