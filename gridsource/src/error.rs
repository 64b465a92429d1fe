use thiserror::Error;

/// Errors raised when a window configuration is rejected at construction time.
///
/// Misconfiguration is fatal rather than silently defaulted: a window built
/// from a zero page size or a zero render cap cannot make progress, and
/// catching it at construction is cheaper than debugging a corrupted window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `page_size` must be at least 1.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// A bounded `max_render_item_count` must be at least 1.
    #[error("max render item count must be greater than zero")]
    ZeroRenderCap,
}
