//! Nesting of tuple-keyed results
//!
//! Grouped aggregations produce `(g1, g2, ...) -> value` pairs. Response
//! bodies want them as nested JSON objects, `out[g1][g2]... = value`.
//! [`nest`] does that once for every arity: entries sharing a prefix are
//! merged into the same inner object, never overwritten.
//!
//! ```
//! use hotel_server::analytics::shaping::nest;
//! use serde_json::json;
//!
//! let nested = nest([(("A", 1), 10), (("A", 2), 20), (("B", 1), 5)]).unwrap();
//! assert_eq!(
//!     serde_json::Value::Object(nested),
//!     json!({"A": {"1": 10, "2": 20}, "B": {"1": 5}})
//! );
//! ```

use hotel_common::dates::Month;
use hotel_common::{Hotel, HotelError, Result};
use serde::Serialize;
use serde_json::{Map, Value};

/// A value usable as one level of a nested response key
pub trait GroupKey {
    fn key(&self) -> String;
}

impl GroupKey for Hotel {
    fn key(&self) -> String {
        self.label().to_string()
    }
}

impl GroupKey for Month {
    fn key(&self) -> String {
        self.name().to_string()
    }
}

impl GroupKey for String {
    fn key(&self) -> String {
        self.clone()
    }
}

impl GroupKey for &str {
    fn key(&self) -> String {
        (*self).to_string()
    }
}

/// Flags render as the dataset's `0` / `1`
impl GroupKey for bool {
    fn key(&self) -> String {
        let flag = if *self { "1" } else { "0" };
        flag.to_string()
    }
}

macro_rules! display_group_key {
    ($($ty:ty),*) => {
        $(
            impl GroupKey for $ty {
                fn key(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_group_key!(i32, u32, usize);

/// A tuple of group keys
pub trait KeyPath {
    /// Rendered keys, outermost first
    fn segments(&self) -> Vec<String>;
}

impl<A: GroupKey> KeyPath for (A,) {
    fn segments(&self) -> Vec<String> {
        vec![self.0.key()]
    }
}

impl<A: GroupKey, B: GroupKey> KeyPath for (A, B) {
    fn segments(&self) -> Vec<String> {
        vec![self.0.key(), self.1.key()]
    }
}

impl<A: GroupKey, B: GroupKey, C: GroupKey> KeyPath for (A, B, C) {
    fn segments(&self) -> Vec<String> {
        vec![self.0.key(), self.1.key(), self.2.key()]
    }
}

/// Build a nested object from tuple-keyed entries
///
/// # Errors
///
/// [`HotelError::InvalidArgument`] when one path is a prefix of another, so a
/// key would have to be both a value and an object.
pub fn nest<K, V, I>(entries: I) -> Result<Map<String, Value>>
where
    K: KeyPath,
    V: Serialize,
    I: IntoIterator<Item = (K, V)>,
{
    let mut root = Map::new();

    for (path, value) in entries {
        let segments = path.segments();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let mut level = &mut root;
        for parent in parents {
            let child = level
                .entry(parent.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            level = match child {
                Value::Object(map) => map,
                _ => return Err(conflict(&segments)),
            };
        }

        if level.contains_key(leaf) {
            return Err(conflict(&segments));
        }
        level.insert(leaf.clone(), serde_json::to_value(value)?);
    }

    Ok(root)
}

/// Single-level object from key/value pairs, keeping their order
pub fn flat<K, V, I>(entries: I) -> Result<Map<String, Value>>
where
    K: GroupKey,
    V: Serialize,
    I: IntoIterator<Item = (K, V)>,
{
    nest(entries.into_iter().map(|(key, value)| ((key,), value)))
}

fn conflict(segments: &[String]) -> HotelError {
    HotelError::InvalidArgument(format!("conflicting result key {}", segments.join(" / ")))
}
