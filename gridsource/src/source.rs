use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_VIEWER: AtomicU64 = AtomicU64::new(1);

/// Identifies one connected consumer of a [`SnapshotSource`].
///
/// A buffer allocates its handle at construction and presents it on every
/// pull, so a shared source can serve several independent windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewerHandle(u64);

impl ViewerHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_VIEWER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A pull-per-viewer-change provider of full-dataset snapshots.
///
/// `pull` is called once at connect time and again on every
/// [`crate::WindowedBuffer::viewer_changed`]. Each call must return the
/// complete ordered dataset as currently known to the source.
pub trait SnapshotSource<T>: Send + Sync {
    fn pull(&self, viewer: ViewerHandle) -> Vec<T>;

    /// Called when the owning session is torn down.
    fn disconnect(&self, _viewer: ViewerHandle) {}
}

/// The backing-dataset provider, resolved once at session setup.
///
/// The three variants normalize to the same "sequence of snapshots" flow
/// inside the buffer; no per-update branching on provider kind remains after
/// `connect`.
pub enum DataInput<T> {
    /// A fixed, already-complete ordered dataset, emitted once at connect.
    Static(Vec<T>),
    /// A push-based stream: the host delivers each snapshot via
    /// [`crate::WindowedBuffer::apply_snapshot`].
    Stream,
    /// A pull source re-queried per viewer change.
    Source(Arc<dyn SnapshotSource<T>>),
}

impl<T> From<Vec<T>> for DataInput<T> {
    fn from(data: Vec<T>) -> Self {
        Self::Static(data)
    }
}

impl<T> core::fmt::Debug for DataInput<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Static(data) => f.debug_tuple("Static").field(&data.len()).finish(),
            Self::Stream => f.write_str("Stream"),
            Self::Source(_) => f.write_str("Source(..)"),
        }
    }
}
