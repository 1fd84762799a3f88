//! Shared deserialization for the map implementations.

use std::fmt;
use std::marker::PhantomData;

use super::Map;

/// Builds any [`Map`] from a serialized map, one entry at a time.
///
/// A key that appears twice keeps its last value instead of producing a
/// shadowed duplicate.
pub(super) struct MapVisitor<M, K, V> {
    expecting: &'static str,
    marker: PhantomData<fn() -> (M, K, V)>,
}

impl<M, K, V> MapVisitor<M, K, V> {
    pub(super) const fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: PhantomData,
        }
    }
}

impl<'de, M, K, V> serde::de::Visitor<'de> for MapVisitor<M, K, V>
where
    M: Map<K, V> + Default,
    K: serde::Deserialize<'de>,
    V: serde::Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::MapAccess<'de>,
    {
        let mut map = M::default();
        while let Some((key, value)) = access.next_entry::<K, V>()? {
            match map.at_mut(&key) {
                Ok(slot) => *slot = value,
                Err(_) => map.insert(key, value),
            }
        }
        Ok(map)
    }
}
