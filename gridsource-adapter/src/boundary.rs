/// Boundary-proximity thresholds, as percentages of the viewport size.
///
/// A signal fires when the scroll position is within `top_percent` of the
/// content start, or within `bottom_percent` of the content end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryThresholds {
    pub top_percent: u64,
    pub bottom_percent: u64,
}

impl Default for BoundaryThresholds {
    fn default() -> Self {
        Self {
            top_percent: 20,
            bottom_percent: 20,
        }
    }
}

/// Result of one proximity check. Both edges can hit at once when the
/// content barely exceeds the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub near_start: bool,
    pub near_end: bool,
}

/// Derives boundary-proximity signals from viewport geometry.
///
/// Signals are suppressed until [`BoundaryWatcher::note_scroll`] has been
/// called at least once: initial layout can place the content edge inside
/// the threshold margin without the user having scrolled anywhere, and that
/// spurious firing must not trigger a pull.
#[derive(Clone, Debug)]
pub struct BoundaryWatcher {
    thresholds: BoundaryThresholds,
    has_scrolled: bool,
}

impl BoundaryWatcher {
    pub fn new(thresholds: BoundaryThresholds) -> Self {
        Self {
            thresholds,
            has_scrolled: false,
        }
    }

    pub fn thresholds(&self) -> BoundaryThresholds {
        self.thresholds
    }

    /// Marks that the renderer has genuinely scrolled. Call from the host's
    /// scroll listener.
    pub fn note_scroll(&mut self) {
        self.has_scrolled = true;
    }

    pub fn has_scrolled(&self) -> bool {
        self.has_scrolled
    }

    /// Checks the current geometry against both thresholds.
    ///
    /// `scroll_offset` is the distance from the content start to the top of
    /// the viewport; `total_size` is the full content extent in the same
    /// units.
    pub fn check(&self, scroll_offset: u64, viewport_size: u64, total_size: u64) -> BoundaryHits {
        if !self.has_scrolled || viewport_size == 0 {
            return BoundaryHits::default();
        }
        let top_margin = viewport_size * self.thresholds.top_percent / 100;
        let bottom_margin = viewport_size * self.thresholds.bottom_percent / 100;
        BoundaryHits {
            near_start: scroll_offset <= top_margin,
            near_end: scroll_offset
                .saturating_add(viewport_size)
                .saturating_add(bottom_margin)
                >= total_size,
        }
    }
}

impl Default for BoundaryWatcher {
    fn default() -> Self {
        Self::new(BoundaryThresholds::default())
    }
}
