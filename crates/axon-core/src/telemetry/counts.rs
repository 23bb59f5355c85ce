// Copyright 2026 the Axon authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An insertion-ordered mapping from counter names to counts.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// An insertion-ordered mapping from counter name to accumulated count.
///
/// Snapshot consumers require counters to be enumerated in the order the
/// names were first registered, not in alphabetical or hash order. The map
/// keeps entries in a vector (the authoritative order) paired with a
/// name-to-slot index for O(1) lookup. Serializes as a JSON object whose
/// keys appear in registration order.
#[derive(Debug, Clone, Default)]
pub struct CountMap {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl CountMap {
    /// Creates a new, empty count map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty count map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts a count under `name`, appending to the iteration order on
    /// first insertion. Re-inserting an existing name overwrites its count
    /// in place without disturbing the order.
    pub fn insert(&mut self, name: impl Into<String>, count: u64) {
        let name = name.into();
        match self.index.get(&name) {
            Some(&slot) => self.entries[slot].1 = count,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, count));
            }
        }
    }

    /// Returns the count recorded under `name`, if any.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.index.get(name).map(|&slot| self.entries[slot].1)
    }

    /// Returns whether `name` has an entry.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(name, count)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Iterates over the names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

// Equality is order-sensitive: two snapshots are equal only if they report
// the same counts in the same registration order.
impl PartialEq for CountMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for CountMap {}

impl FromIterator<(String, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (name, count) in iter {
            map.insert(name, count);
        }
        map
    }
}

impl<'a> IntoIterator for &'a CountMap {
    type Item = &'a (String, u64);
    type IntoIter = std::slice::Iter<'a, (String, u64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, count) in &self.entries {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CountMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountMapVisitor;

        impl<'de> Visitor<'de> for CountMapVisitor {
            type Value = CountMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of counter names to counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = CountMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    map.insert(name, count);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(CountMapVisitor)
    }
}
