use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<V> = BTreeMap<String, V>;
