use alloc::sync::Arc;

use crate::error::ConfigError;
use crate::types::WindowUpdate;

/// A callback fired with every window emission.
///
/// The slice borrows the buffer's backing dataset; copy what you need if the
/// render layer keeps rows across updates.
pub type OnUpdateCallback<T> = Arc<dyn Fn(WindowUpdate<'_, T>) + Send + Sync>;

/// Configuration for [`crate::WindowedBuffer`].
///
/// `page_size` is the increment applied per pull request. It is independent
/// of `max_render_item_count`: a page larger than the cap is permitted and
/// simply fills/evicts the window in leaps larger than its span.
pub struct WindowOptions<T> {
    pub page_size: usize,
    /// Upper bound on the rendered window span. `None` disables windowing:
    /// the visible slice is always the entire dataset.
    pub max_render_item_count: Option<usize>,
    /// Optional callback fired on every window emission.
    pub on_update: Option<OnUpdateCallback<T>>,
}

impl<T> WindowOptions<T> {
    /// Creates options with the default page size (50) and no render cap.
    pub fn new() -> Self {
        Self {
            page_size: 50,
            max_render_item_count: None,
            on_update: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_render_item_count(mut self, max_render_item_count: Option<usize>) -> Self {
        self.max_render_item_count = max_render_item_count;
        self
    }

    pub fn with_on_update(
        mut self,
        on_update: Option<impl Fn(WindowUpdate<'_, T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_update = on_update.map(|f| Arc::new(f) as _);
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.max_render_item_count == Some(0) {
            return Err(ConfigError::ZeroRenderCap);
        }
        Ok(())
    }
}

impl<T> Default for WindowOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for WindowOptions<T> {
    fn clone(&self) -> Self {
        Self {
            page_size: self.page_size,
            max_render_item_count: self.max_render_item_count,
            on_update: self.on_update.clone(),
        }
    }
}

impl<T> core::fmt::Debug for WindowOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WindowOptions")
            .field("page_size", &self.page_size)
            .field("max_render_item_count", &self.max_render_item_count)
            .finish_non_exhaustive()
    }
}
