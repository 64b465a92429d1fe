use alloc::vec::Vec;
use core::mem;

use crate::error::ConfigError;
use crate::options::WindowOptions;
use crate::source::{DataInput, ViewerHandle};
use crate::types::{LoadDirection, WindowUpdate};

/// A sliding render window over a potentially unbounded backing dataset.
///
/// The buffer is headless and UI-agnostic: it owns no UI objects and is
/// driven entirely by dataset snapshots and grow requests. It bounds render
/// cost by never materializing more than `max_render_item_count` rows, and
/// reports a signed eviction count with every emission so the render layer
/// can drop a *matching* number of recycled rows, which is what keeps
/// scroll anchoring correct.
///
/// Grow calls are pure window slides over locally held data; fetching more
/// data from upstream is the caller's job (see the `gridsource-adapter`
/// crate's coordinator). The buffer performs no reentrancy guard of its own.
pub struct WindowedBuffer<T> {
    options: WindowOptions<T>,
    input: DataInput<T>,
    viewer: ViewerHandle,
    all_data: Vec<T>,
    start_pointer: usize,
    end_pointer: usize,
    /// Visible range of the last emission; `None` before the first.
    emitted: Option<(usize, usize)>,
    /// Direction recorded by the most recent grow call, consumed by the next
    /// snapshot arrival.
    pending_direction: Option<LoadDirection>,
    last_removed_count: i64,
    update_count: u64,
    connected: bool,
    closed: bool,
}

impl<T> WindowedBuffer<T> {
    /// Creates a buffer over `input` with the window `[0, page_size)`.
    ///
    /// Fails fast on a zero page size or a zero render cap.
    pub fn new(
        input: impl Into<DataInput<T>>,
        options: WindowOptions<T>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        gdebug!(
            page_size = options.page_size,
            max_render_item_count = options.max_render_item_count,
            "WindowedBuffer::new"
        );
        Ok(Self {
            end_pointer: options.page_size,
            options,
            input: input.into(),
            viewer: ViewerHandle::next(),
            all_data: Vec::new(),
            start_pointer: 0,
            emitted: None,
            pending_direction: None,
            last_removed_count: 0,
            update_count: 0,
            connected: false,
            closed: false,
        })
    }

    /// Resolves the data input and applies its first snapshot.
    ///
    /// Static and pull inputs emit immediately; a [`DataInput::Stream`]
    /// input emits nothing until the host pushes a snapshot. Calling
    /// `connect` twice, or after `disconnect`, is a no-op.
    pub fn connect(&mut self) {
        if self.connected || self.closed {
            return;
        }
        self.connected = true;
        match mem::replace(&mut self.input, DataInput::Stream) {
            DataInput::Static(data) => self.initial_snapshot(data),
            DataInput::Stream => {}
            DataInput::Source(source) => {
                let data = source.pull(self.viewer);
                self.input = DataInput::Source(source);
                self.initial_snapshot(data);
            }
        }
    }

    // First emission materializes the initialize-time window: one page from
    // the start, clamped to the cap. Later snapshots go through the
    // directional rules in `on_dataset_update`.
    fn initial_snapshot(&mut self, data: Vec<T>) {
        let len = data.len();
        self.all_data = data;
        self.start_pointer = 0;
        match self.options.max_render_item_count {
            None => {
                self.end_pointer = len;
                self.emit(0);
            }
            Some(cap) => {
                self.end_pointer = self.options.page_size.min(len).min(cap);
                self.emit(removed(0, self.options.page_size, cap));
            }
        }
    }

    /// Completes the update stream and releases the upstream source.
    ///
    /// Further snapshots and grow calls are ignored.
    pub fn disconnect(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let DataInput::Source(source) = &self.input {
            source.disconnect(self.viewer);
        }
        self.options.on_update = None;
        gdebug!(updates = self.update_count, "WindowedBuffer::disconnect");
    }

    /// Applies a new full-dataset snapshot, consuming the direction hint
    /// recorded by the most recent grow call.
    ///
    /// This is the entry point for push-based inputs and for refreshes after
    /// an upstream fetch.
    pub fn apply_snapshot(&mut self, new_data: Vec<T>) {
        let hint = self.pending_direction.take();
        self.on_dataset_update(new_data, hint);
    }

    /// Applies a new full-dataset snapshot with an explicit direction hint.
    ///
    /// With an unbounded cap the visible slice is the whole dataset and no
    /// windowing occurs. Otherwise a `Next` hint pins the window to the new
    /// end of the dataset; `Previous` or no hint pins it to the start.
    pub fn on_dataset_update(&mut self, new_data: Vec<T>, direction_hint: Option<LoadDirection>) {
        if self.closed {
            return;
        }
        let prev_visible_len = self.visible_len();
        let len = new_data.len();
        self.all_data = new_data;

        let Some(cap) = self.options.max_render_item_count else {
            self.start_pointer = 0;
            self.end_pointer = len;
            self.emit(0);
            return;
        };

        match direction_hint {
            Some(LoadDirection::Next) => {
                self.end_pointer = len;
                self.start_pointer = self.end_pointer.saturating_sub(cap);
            }
            Some(LoadDirection::Previous) | None => {
                self.start_pointer = 0;
                self.end_pointer = len.min(cap);
            }
        }
        let removed_count = removed(prev_visible_len, self.options.page_size, cap);
        self.emit(removed_count);
    }

    /// Re-pulls from a pull-per-viewer input and applies the result.
    ///
    /// No-op for static and stream inputs.
    pub fn viewer_changed(&mut self) {
        if self.closed {
            return;
        }
        if let DataInput::Source(source) = &self.input {
            let data = source.pull(self.viewer);
            self.apply_snapshot(data);
        }
    }

    /// Slides the window toward the end of the locally held data.
    ///
    /// Returns `true` ("exhausted") with no state change when a full page
    /// past the current end is not available; the recorded `Next` hint
    /// survives so a subsequently fetched snapshot still lands forward.
    pub fn grow_forward(&mut self) -> bool {
        if self.closed {
            return true;
        }
        self.pending_direction = Some(LoadDirection::Next);

        let page_size = self.options.page_size;
        let new_end = self.end_pointer + page_size;
        if new_end > self.all_data.len() {
            gtrace!(new_end, available = self.all_data.len(), "grow_forward exhausted");
            return true;
        }

        let prev_visible_len = self.visible_len();
        match self.options.max_render_item_count {
            Some(cap) => {
                if new_end - self.start_pointer > cap {
                    self.start_pointer = new_end - cap;
                }
                self.end_pointer = new_end.min(self.all_data.len());
                self.emit(removed(prev_visible_len, page_size, cap));
            }
            None => {
                self.end_pointer = new_end.min(self.all_data.len());
                self.emit(0);
            }
        }
        false
    }

    /// Slides the window toward the start of the locally held data.
    ///
    /// Returns `true` with no state change when a full page before the
    /// current start is not available.
    pub fn grow_backward(&mut self) -> bool {
        if self.closed {
            return true;
        }
        self.pending_direction = Some(LoadDirection::Previous);

        let page_size = self.options.page_size;
        let Some(new_start) = self.start_pointer.checked_sub(page_size) else {
            gtrace!(start = self.start_pointer, "grow_backward exhausted");
            return true;
        };

        let prev_visible_len = self.visible_len();
        self.start_pointer = new_start;
        self.end_pointer = self.end_pointer.saturating_sub(page_size);
        match self.options.max_render_item_count {
            Some(cap) => self.emit(removed(prev_visible_len, page_size, cap)),
            None => self.emit(0),
        }
        false
    }

    /// Dispatches to [`Self::grow_forward`] / [`Self::grow_backward`].
    pub fn grow(&mut self, direction: LoadDirection) -> bool {
        match direction {
            LoadDirection::Next => self.grow_forward(),
            LoadDirection::Previous => self.grow_backward(),
        }
    }

    /// The visible slice of the last emission.
    pub fn current(&self) -> &[T] {
        match self.emitted {
            Some((start, end)) => &self.all_data[start..end],
            None => &[],
        }
    }

    /// The full locally held dataset.
    pub fn all_data(&self) -> &[T] {
        &self.all_data
    }

    /// The `[start, end)` window pointers.
    pub fn window(&self) -> (usize, usize) {
        (self.start_pointer, self.end_pointer)
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn max_render_item_count(&self) -> Option<usize> {
        self.options.max_render_item_count
    }

    /// The eviction report of the last emission (signed; negative means net
    /// growth).
    pub fn last_removed_count(&self) -> i64 {
        self.last_removed_count
    }

    /// Number of emissions so far.
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_connected(&self) -> bool {
        self.connected && !self.closed
    }

    pub fn set_on_update(
        &mut self,
        on_update: Option<impl Fn(WindowUpdate<'_, T>) + Send + Sync + 'static>,
    ) {
        if self.closed {
            return;
        }
        self.options.on_update = on_update.map(|f| alloc::sync::Arc::new(f) as _);
    }

    fn visible_len(&self) -> usize {
        match self.emitted {
            Some((start, end)) => end - start,
            None => 0,
        }
    }

    fn emit(&mut self, removed_count: i64) {
        self.emitted = Some((self.start_pointer, self.end_pointer));
        self.last_removed_count = removed_count;
        self.update_count += 1;
        gtrace!(
            start = self.start_pointer,
            end = self.end_pointer,
            removed_count,
            "window update"
        );
        if let Some(cb) = &self.options.on_update {
            cb(WindowUpdate {
                data: &self.all_data[self.start_pointer..self.end_pointer],
                removed_count,
            });
        }
    }
}

// Signed on purpose: previous + page - cap goes negative while the window is
// still filling, and consumers detect net growth from the sign.
fn removed(prev_visible_len: usize, page_size: usize, cap: usize) -> i64 {
    prev_visible_len as i64 + page_size as i64 - cap as i64
}

impl<T> core::fmt::Debug for WindowedBuffer<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowedBuffer")
            .field("options", &self.options)
            .field("input", &self.input)
            .field("len", &self.all_data.len())
            .field("start_pointer", &self.start_pointer)
            .field("end_pointer", &self.end_pointer)
            .field("pending_direction", &self.pending_direction)
            .field("connected", &self.connected)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
