use alloc::sync::Arc;
use alloc::vec::Vec;

use gridsource::{LoadDirection, LoadingState, WindowedBuffer};

use crate::anchor::{ScrollAnchorTarget, reanchor_after_update};
use crate::boundary::{BoundaryThresholds, BoundaryWatcher};

/// Fired once per accepted local pull, with the direction being loaded.
pub type LoadingCallback = Arc<dyn Fn(LoadingState) + Send + Sync>;

/// Asks the host to fetch more data in a direction. Must return whether a
/// pull was actually issued, so the coordinator knows to stay pending until
/// the resulting snapshot is pushed.
pub type LoadMoreCallback = Arc<dyn Fn(LoadDirection) -> bool + Send + Sync>;

/// Pull-request state. At most one pull is ever in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PullState {
    Idle,
    Pending(LoadDirection),
}

/// Translates boundary-proximity signals into window pulls.
///
/// The coordinator owns a [`WindowedBuffer`] and a [`BoundaryWatcher`] and
/// enforces the single-outstanding-pull rule: a boundary signal arriving
/// while a pull is pending is dropped (an expected race between a fast user
/// and an outstanding pull, not a failure). This also gives the ordering
/// guarantee that request N's window update is observed before request N+1
/// can be issued.
pub struct ScrollCoordinator<T> {
    buffer: WindowedBuffer<T>,
    watcher: BoundaryWatcher,
    state: PullState,
    /// Direction of the most recent request, for re-anchoring.
    current_direction: LoadDirection,
    last_handled_update: u64,
    on_loading: Option<LoadingCallback>,
    load_more: Option<LoadMoreCallback>,
    suppress_loading: bool,
}

impl<T> ScrollCoordinator<T> {
    pub fn new(buffer: WindowedBuffer<T>, thresholds: BoundaryThresholds) -> Self {
        Self {
            buffer,
            watcher: BoundaryWatcher::new(thresholds),
            state: PullState::Idle,
            current_direction: LoadDirection::Next,
            last_handled_update: 0,
            on_loading: None,
            load_more: None,
            suppress_loading: false,
        }
    }

    pub fn buffer(&self) -> &WindowedBuffer<T> {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut WindowedBuffer<T> {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> WindowedBuffer<T> {
        self.buffer
    }

    pub fn watcher(&self) -> &BoundaryWatcher {
        &self.watcher
    }

    pub fn state(&self) -> PullState {
        self.state
    }

    pub fn set_on_loading(
        &mut self,
        on_loading: Option<impl Fn(LoadingState) + Send + Sync + 'static>,
    ) {
        self.on_loading = on_loading.map(|f| Arc::new(f) as _);
    }

    pub fn set_load_more(
        &mut self,
        load_more: Option<impl Fn(LoadDirection) -> bool + Send + Sync + 'static>,
    ) {
        self.load_more = load_more.map(|f| Arc::new(f) as _);
    }

    /// Resolves the buffer's data input and applies its first snapshot.
    pub fn connect(&mut self) {
        self.buffer.connect();
    }

    /// Tears the session down: completes the buffer's update stream and
    /// drops any pending pull.
    pub fn disconnect(&mut self) {
        self.state = PullState::Idle;
        self.buffer.disconnect();
    }

    /// Marks that the renderer has genuinely scrolled. Boundary signals are
    /// suppressed until this has happened once.
    pub fn note_scroll(&mut self) {
        self.watcher.note_scroll();
    }

    /// Feeds current viewport geometry through the boundary watcher and
    /// issues pulls for any edges that fired.
    pub fn on_viewport(&mut self, scroll_offset: u64, viewport_size: u64, total_size: u64) {
        let hits = self.watcher.check(scroll_offset, viewport_size, total_size);
        if hits.near_end {
            self.request(LoadDirection::Next);
        }
        if hits.near_start {
            self.request(LoadDirection::Previous);
        }
    }

    /// Issues a pull request in `direction`.
    ///
    /// A grow over locally held data resolves synchronously: the window
    /// update is emitted and a loading notification fires. When local data
    /// is exhausted, the request is handed upstream via the load-more
    /// callback; if the host reports a pull was issued, the coordinator
    /// stays pending until [`ScrollCoordinator::push_snapshot`] delivers the
    /// result. Requests made while pending are ignored.
    pub fn request(&mut self, direction: LoadDirection) {
        if !self.buffer.is_connected() {
            return;
        }
        if matches!(self.state, PullState::Pending(_)) {
            adebug!(?direction, "pull already pending; request ignored");
            return;
        }
        self.state = PullState::Pending(direction);
        self.current_direction = direction;

        let exhausted = self.buffer.grow(direction);
        if !exhausted {
            self.state = PullState::Idle;
            self.emit_loading(direction);
            return;
        }

        let issued = self.load_more.as_ref().is_some_and(|f| f(direction));
        if !issued {
            self.state = PullState::Idle;
        }
    }

    /// Delivers a fresh dataset snapshot (e.g. after an upstream fetch),
    /// resolving any pending pull.
    pub fn push_snapshot(&mut self, data: Vec<T>) {
        self.buffer.apply_snapshot(data);
        self.state = PullState::Idle;
    }

    /// Suppresses loading notifications while a programmatic reset is in
    /// progress.
    pub fn begin_reset(&mut self) {
        self.suppress_loading = true;
    }

    pub fn end_reset(&mut self) {
        self.suppress_loading = false;
    }

    /// The re-anchor correction for the most recent window update, if one is
    /// needed. Consumed: asking again for the same update returns `None`.
    ///
    /// `row_count` is the render layer's current row-list length;
    /// `scrolled_to_bottom` whether the viewport was pinned to the content
    /// end before the update. The very first emission never re-anchors.
    pub fn take_reanchor(
        &mut self,
        row_count: usize,
        scrolled_to_bottom: bool,
    ) -> Option<ScrollAnchorTarget> {
        let count = self.buffer.update_count();
        if count <= 1 || count == self.last_handled_update {
            return None;
        }
        self.last_handled_update = count;
        reanchor_after_update(
            self.current_direction,
            self.buffer.last_removed_count(),
            row_count,
            scrolled_to_bottom,
        )
    }

    fn emit_loading(&self, direction: LoadDirection) {
        if self.suppress_loading {
            return;
        }
        if let Some(cb) = &self.on_loading {
            cb(LoadingState {
                requesting: direction,
            });
        }
    }
}

impl<T> core::fmt::Debug for ScrollCoordinator<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollCoordinator")
            .field("buffer", &self.buffer)
            .field("watcher", &self.watcher)
            .field("state", &self.state)
            .field("current_direction", &self.current_direction)
            .field("suppress_loading", &self.suppress_loading)
            .finish_non_exhaustive()
    }
}
