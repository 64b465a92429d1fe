use gridsource::LoadDirection;

/// Where the render layer must re-anchor the viewport after a window update
/// evicted rows.
///
/// Re-anchoring is deferred data, not an action: the host applies it after
/// its next layout pass settles, scrolling the named row back into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAnchorTarget {
    /// Re-anchor to the row that was first-visible before the update
    /// (window grew backward).
    PreviousFirstRow,
    /// Re-anchor to the row at `index` in the updated row list: the row
    /// that was last-visible before the update, offset by the eviction
    /// count (window grew forward while pinned to the bottom).
    PreviousLastRow { index: usize },
}

/// Computes the re-anchor target for one window update.
///
/// Returns `None` when no correction is needed: nothing was evicted
/// (`removed_count ≤ 0` is net growth), the row list is empty, or the window
/// grew forward while the viewport was not pinned to the bottom.
pub fn reanchor_after_update(
    direction: LoadDirection,
    removed_count: i64,
    row_count: usize,
    scrolled_to_bottom: bool,
) -> Option<ScrollAnchorTarget> {
    if removed_count <= 0 || row_count == 0 {
        return None;
    }
    match direction {
        LoadDirection::Previous => Some(ScrollAnchorTarget::PreviousFirstRow),
        LoadDirection::Next => {
            if !scrolled_to_bottom {
                return None;
            }
            let removed = removed_count as usize;
            Some(ScrollAnchorTarget::PreviousLastRow {
                index: row_count.saturating_sub(removed + 1),
            })
        }
    }
}
