use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::expansion::GroupExpansion;
use crate::map::KeyMap;
use crate::types::{GroupRow, GroupValue, GroupedRow, GroupedRowRef};

/// Extractor deriving a group value from an item.
pub type GroupByCallback<T> = Arc<dyn Fn(&T) -> GroupValue + Send + Sync>;

/// Formatter for group header labels.
pub type GroupLabelCallback = Arc<dyn Fn(&GroupValue, usize) -> String + Send + Sync>;

/// Configuration for the grouping transform.
///
/// The transform does not sort: group contiguity in the output is whatever
/// the input order yields, and groups appear in first-seen order. Present
/// the dataset pre-sorted by group if contiguous blocks are desired.
pub struct GroupConfig<T> {
    group_by: GroupByCallback<T>,
    /// Initial expansion applied by one-shot bulk initialization. `None`
    /// defaults to expanded.
    pub initial_collapsed: Option<bool>,
    group_label: Option<GroupLabelCallback>,
}

impl<T> GroupConfig<T> {
    pub fn new(group_by: impl Fn(&T) -> GroupValue + Send + Sync + 'static) -> Self {
        Self {
            group_by: Arc::new(group_by),
            initial_collapsed: None,
            group_label: None,
        }
    }

    pub fn with_initial_collapsed(mut self, initial_collapsed: bool) -> Self {
        self.initial_collapsed = Some(initial_collapsed);
        self
    }

    pub fn with_group_label(
        mut self,
        group_label: Option<impl Fn(&GroupValue, usize) -> String + Send + Sync + 'static>,
    ) -> Self {
        self.group_label = group_label.map(|f| Arc::new(f) as _);
        self
    }

    pub fn group_value(&self, item: &T) -> GroupValue {
        (self.group_by)(item)
    }

    /// The header label for a group: the configured formatter, or
    /// `"{value} ({count} items)"`.
    pub fn label(&self, value: &GroupValue, count: usize) -> String {
        match &self.group_label {
            Some(f) => f(value, count),
            None => alloc::format!("{value} ({count} items)"),
        }
    }
}

impl<T> Clone for GroupConfig<T> {
    fn clone(&self) -> Self {
        Self {
            group_by: Arc::clone(&self.group_by),
            initial_collapsed: self.initial_collapsed,
            group_label: self.group_label.clone(),
        }
    }
}

impl<T> core::fmt::Debug for GroupConfig<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupConfig")
            .field("initial_collapsed", &self.initial_collapsed)
            .finish_non_exhaustive()
    }
}

struct Bucket {
    key: String,
    value: GroupValue,
    members: Vec<usize>,
}

// Buckets in first-seen order; the index map only serves lookups.
fn bucket_items<T>(data: &[T], config: &GroupConfig<T>) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: KeyMap<usize> = KeyMap::default();
    for (i, item) in data.iter().enumerate() {
        let value = config.group_value(item);
        let key = value.key();
        match index.get(&key) {
            Some(&b) => buckets[b].members.push(i),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket {
                    key,
                    value,
                    members: alloc::vec![i],
                });
            }
        }
    }
    buckets
}

/// Runs the grouping transform over `data`, emitting each output row to `f`
/// without allocating item copies.
///
/// Per group, in first-seen order: one group header, then (only if the
/// group is expanded) one member row per item in original order.
///
/// If the expansion table holds no recorded state and `data` is non-empty,
/// every observed group key is initialized to `!initial_collapsed` first.
/// The initialization is one-shot: any recorded state suppresses it, so
/// toggles made between passes persist. An empty `data` emits nothing and
/// has no initialization side effect.
pub fn for_each_grouped_row<T>(
    data: &[T],
    config: &GroupConfig<T>,
    state: &mut GroupExpansion,
    mut f: impl FnMut(GroupedRowRef<'_, T>),
) {
    if data.is_empty() {
        return;
    }

    let buckets = bucket_items(data, config);

    if !state.has_recorded_state() {
        let all_expanded = !config.initial_collapsed.unwrap_or(false);
        state.initialize_groups(buckets.iter().map(|b| b.key.clone()), all_expanded);
    }

    for bucket in &buckets {
        let is_expanded = state.is_expanded(&bucket.key);
        f(GroupedRowRef::Group(GroupRow {
            group_key: bucket.key.clone(),
            group_value: bucket.value.clone(),
            count: bucket.members.len(),
            is_expanded,
        }));
        if is_expanded {
            for &i in &bucket.members {
                f(GroupedRowRef::Data {
                    data: &data[i],
                    group_key: &bucket.key,
                });
            }
        }
    }
}

/// Collects the grouping transform's output into owned rows.
pub fn collect_grouped_rows<T: Clone>(
    data: &[T],
    config: &GroupConfig<T>,
    state: &mut GroupExpansion,
) -> Vec<GroupedRow<T>> {
    let mut out = Vec::new();
    for_each_grouped_row(data, config, state, |row| out.push(row.to_owned_row()));
    out
}

/// A grouping session: one config, one expansion table, and the latest flat
/// snapshot, re-expressed as grouped rows on demand.
///
/// The expansion table persists across `set_data` calls, so expand/collapse
/// choices survive re-grouping and partial data arrival. Dropping the
/// session (or calling [`GroupingSession::reset`] when grouping is disabled)
/// discards that state.
pub struct GroupingSession<T> {
    config: GroupConfig<T>,
    expansion: GroupExpansion,
    data: Vec<T>,
}

impl<T> GroupingSession<T> {
    pub fn new(config: GroupConfig<T>) -> Self {
        Self {
            config,
            expansion: GroupExpansion::new(),
            data: Vec::new(),
        }
    }

    pub fn config(&self) -> &GroupConfig<T> {
        &self.config
    }

    pub fn expansion(&self) -> &GroupExpansion {
        &self.expansion
    }

    pub fn expansion_mut(&mut self) -> &mut GroupExpansion {
        &mut self.expansion
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Replaces the flat snapshot. Expansion state is untouched.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.data = data;
    }

    /// Runs the transform over the current snapshot.
    pub fn for_each_row(&mut self, f: impl FnMut(GroupedRowRef<'_, T>)) {
        for_each_grouped_row(&self.data, &self.config, &mut self.expansion, f);
    }

    /// The current snapshot as owned grouped rows.
    pub fn rows(&mut self) -> Vec<GroupedRow<T>>
    where
        T: Clone,
    {
        collect_grouped_rows(&self.data, &self.config, &mut self.expansion)
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expansion.is_expanded(key)
    }

    pub fn toggle(&mut self, key: &str) {
        self.expansion.toggle(key);
    }

    /// Expands every group observed in the current snapshot.
    pub fn expand_all(&mut self) {
        let keys = self.observed_keys();
        self.expansion.expand_all(keys);
    }

    pub fn collapse_all(&mut self) {
        self.expansion.collapse_all();
    }

    /// Clears expansion state entirely (e.g. when grouping is disabled).
    pub fn reset(&mut self) {
        self.expansion.reset();
    }

    fn observed_keys(&self) -> Vec<String> {
        bucket_items(&self.data, &self.config)
            .into_iter()
            .map(|b| b.key)
            .collect()
    }
}

impl<T> core::fmt::Debug for GroupingSession<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GroupingSession")
            .field("config", &self.config)
            .field("expansion", &self.expansion)
            .field("data_len", &self.data.len())
            .finish()
    }
}
