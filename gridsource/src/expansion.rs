use alloc::string::String;
use alloc::sync::Arc;

use crate::map::KeyMap;

/// An immutable copy of the expansion table, published on every mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpansionSnapshot {
    entries: KeyMap<bool>,
}

impl ExpansionSnapshot {
    pub fn is_expanded(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn for_each(&self, mut f: impl FnMut(&str, bool)) {
        for (k, v) in &self.entries {
            f(k, *v);
        }
    }
}

/// A callback fired with a fresh snapshot after every expansion mutation.
pub type ExpansionChangeCallback = Arc<dyn Fn(&ExpansionSnapshot) + Send + Sync>;

/// Expand/collapse registry for row groups.
///
/// Entries are explicit `key → bool` records: a key toggled collapsed keeps
/// its entry, so an all-collapsed table is never mistaken for one that was
/// never initialized. Absent keys read as collapsed.
///
/// The registry is independent of any dataset snapshot. It is created per
/// grouping session, persists across data arrivals, and is cleared only by
/// [`GroupExpansion::reset`].
pub struct GroupExpansion {
    entries: KeyMap<bool>,
    on_change: Option<ExpansionChangeCallback>,
}

impl GroupExpansion {
    pub fn new() -> Self {
        Self {
            entries: KeyMap::default(),
            on_change: None,
        }
    }

    /// Registers the change callback and publishes the current state to it.
    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&ExpansionSnapshot) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self.publish();
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.entries.get(key).copied().unwrap_or(false)
    }

    /// Whether any key has recorded state. The grouping transform uses this
    /// to keep bulk initialization one-shot.
    pub fn has_recorded_state(&self) -> bool {
        !self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flips a key. An absent key counts as collapsed, so toggling it
    /// records it expanded.
    pub fn toggle(&mut self, key: &str) {
        let next = !self.is_expanded(key);
        self.entries.insert(String::from(key), next);
        gtrace!(key, expanded = next, "expansion toggle");
        self.publish();
    }

    pub fn set_expanded(&mut self, key: &str, expanded: bool) {
        self.entries.insert(String::from(key), expanded);
        self.publish();
    }

    /// Resets the table to exactly the given keys, all expanded or all
    /// collapsed. Every key gets an explicit entry either way.
    pub fn initialize_groups(
        &mut self,
        keys: impl IntoIterator<Item = String>,
        all_expanded: bool,
    ) {
        self.entries.clear();
        for key in keys {
            self.entries.insert(key, all_expanded);
        }
        gdebug!(
            groups = self.entries.len(),
            all_expanded,
            "expansion initialized"
        );
        self.publish();
    }

    /// Resets the table to exactly the given keys, all expanded.
    pub fn expand_all(&mut self, keys: impl IntoIterator<Item = String>) {
        self.initialize_groups(keys, true);
    }

    /// Collapses every recorded key. Entries are kept, not removed, so the
    /// table still counts as initialized.
    pub fn collapse_all(&mut self) {
        for v in self.entries.values_mut() {
            *v = false;
        }
        self.publish();
    }

    /// Clears all recorded state, re-arming bulk initialization.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.publish();
    }

    pub fn snapshot(&self) -> ExpansionSnapshot {
        ExpansionSnapshot {
            entries: self.entries.clone(),
        }
    }

    fn publish(&self) {
        if let Some(cb) = &self.on_change {
            cb(&self.snapshot());
        }
    }
}

impl Default for GroupExpansion {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for GroupExpansion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupExpansion")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}
