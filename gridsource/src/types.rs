use alloc::format;
use alloc::string::String;

/// Direction of a window pull request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadDirection {
    /// Toward the end of the dataset.
    Next,
    /// Toward the start of the dataset.
    Previous,
}

/// Loading notification emitted once per accepted pull request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadingState {
    pub requesting: LoadDirection,
}

/// A single window emission: the visible slice plus its eviction report.
///
/// `removed_count` is the number of rows the render layer must drop from its
/// own recycled row list to stay in sync with the window. It is signed:
/// negative values mean the window grew on net, and consumers must treat them
/// as "no removal". The arithmetic is never clamped; scroll-anchoring logic
/// relies on the exact value.
#[derive(Clone, Copy, Debug)]
pub struct WindowUpdate<'a, T> {
    pub data: &'a [T],
    pub removed_count: i64,
}

/// A group value derived from an item by the configured extractor.
///
/// Items whose extractor yields no usable value still form a valid group
/// under [`GroupValue::Missing`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupValue {
    Text(String),
    Int(i64),
    Missing,
}

impl GroupValue {
    /// The display form of this value, used as the group key.
    pub fn key(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Int(n) => format!("{n}"),
            Self::Missing => String::from("(missing)"),
        }
    }
}

impl core::fmt::Display for GroupValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
            Self::Missing => f.write_str("(missing)"),
        }
    }
}

impl From<&str> for GroupValue {
    fn from(s: &str) -> Self {
        Self::Text(String::from(s))
    }
}

impl From<String> for GroupValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for GroupValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl<V: Into<GroupValue>> From<Option<V>> for GroupValue {
    fn from(v: Option<V>) -> Self {
        v.map_or(Self::Missing, Into::into)
    }
}

/// A synthesized group header row.
///
/// `count` is the member count observed by the transform pass that produced
/// this row; it is recomputed every pass, never cached.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupRow {
    pub group_key: String,
    pub group_value: GroupValue,
    pub count: usize,
    pub is_expanded: bool,
}

/// A row produced by the grouping transform: either a group header or a
/// member row wrapping an item with its owning group key.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroupedRow<T> {
    Group(GroupRow),
    Data { data: T, group_key: String },
}

impl<T> GroupedRow<T> {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    /// The wrapped item, if this is a member row.
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Data { data, .. } => Some(data),
            Self::Group(_) => None,
        }
    }

    /// Unwraps a member row into its item.
    pub fn into_data(self) -> Option<T> {
        match self {
            Self::Data { data, .. } => Some(data),
            Self::Group(_) => None,
        }
    }

    pub fn group_key(&self) -> &str {
        match self {
            Self::Group(g) => &g.group_key,
            Self::Data { group_key, .. } => group_key,
        }
    }

    /// A row identity for recycled render rows.
    ///
    /// Group and member rows sharing a group key must not collide, so the key
    /// is prefixed by row kind.
    pub fn track_key(&self) -> String {
        match self {
            Self::Group(g) => format!("group-{}", g.group_key),
            Self::Data { group_key, .. } => format!("data-{group_key}"),
        }
    }
}

/// Borrowed counterpart of [`GroupedRow`], emitted by the zero-allocation
/// visitor [`crate::for_each_grouped_row`].
#[derive(Clone, Debug)]
pub enum GroupedRowRef<'a, T> {
    Group(GroupRow),
    Data { data: &'a T, group_key: &'a str },
}

impl<'a, T> GroupedRowRef<'a, T> {
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Converts to an owned row, cloning the item for member rows.
    pub fn to_owned_row(&self) -> GroupedRow<T>
    where
        T: Clone,
    {
        match self {
            Self::Group(g) => GroupedRow::Group(g.clone()),
            Self::Data { data, group_key } => GroupedRow::Data {
                data: (*data).clone(),
                group_key: String::from(*group_key),
            },
        }
    }
}
