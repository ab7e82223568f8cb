mod broadcast;
mod filter;
mod merge;
mod reduce;


use crate::{error::Error, key::Key, num::Number, raw::Raw, value::Value};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Aggregate
///
/// Recursive numeric aggregate: an ordered map from [`Key`] to [`Value`],
/// where every value is a number or another aggregate. The tree is finite
/// and acyclic by construction (values are owned, never shared between
/// parents), and iteration follows canonical key order deterministically.
///
/// Non-mutating operations return fresh owned structures; the `*_mut` and
/// `apply_*` variants mutate in place and never leave the receiver
/// partially applied on error.
///

#[derive(Clone, Debug, Default, Deref, Deserialize, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Aggregate {
    #[into_iterator(owned, ref)]
    entries: BTreeMap<Key, Value>,
}

impl Aggregate {
    /// Default initial value: missing slots and bare keys coerce to this.
    pub const DEFAULT_INITIAL: Number = Number::ZERO;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Build an aggregate from a flat key sequence; every key maps to
    /// `initial`.
    #[must_use]
    pub fn from_keys<K>(keys: impl IntoIterator<Item = K>, initial: Number) -> Self
    where
        K: Into<Key>,
    {
        let mut out = Self::new();
        out.apply_keys(keys, initial);
        out
    }

    /// Build an aggregate from raw contents: a flat key list or a (possibly
    /// nested) mapping. Anything else fails with
    /// [`Error::InvalidContents`].
    pub fn from_contents(contents: &Raw, initial: Number) -> Result<Self, Error> {
        let mut out = Self::new();
        out.apply_contents(contents, initial)?;
        Ok(out)
    }

    /// Overwrite matching keys with `initial`, in place.
    pub fn apply_keys<K>(&mut self, keys: impl IntoIterator<Item = K>, initial: Number)
    where
        K: Into<Key>,
    {
        for key in keys {
            self.entries.insert(key.into(), Value::Number(initial));
        }
    }

    /// Run constructor logic against an existing aggregate, overwriting
    /// matching keys. The incoming contents are fully built and validated
    /// before the receiver is touched.
    pub fn apply_contents(&mut self, contents: &Raw, initial: Number) -> Result<(), Error> {
        match contents {
            Raw::List(items) => {
                let keys = Self::collect_keys(items)?;
                self.apply_keys(keys, initial);
                Ok(())
            }
            Raw::Map(map) => {
                let entries = Self::build_entries(map, initial)?;
                self.entries.extend(entries);
                Ok(())
            }
            other => Err(Error::InvalidContents { kind: other.kind() }),
        }
    }

    /// Insert a single entry, returning the previous value at that key.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    fn collect_keys(items: &[Raw]) -> Result<Vec<Key>, Error> {
        items
            .iter()
            .map(|item| {
                item.as_key()
                    .ok_or_else(|| Error::InvalidKey { kind: item.kind() })
            })
            .collect()
    }

    fn build_entries(
        map: &BTreeMap<Key, Raw>,
        initial: Number,
    ) -> Result<BTreeMap<Key, Value>, Error> {
        let mut entries = BTreeMap::new();
        for (key, raw) in map {
            let value = match raw {
                Raw::Map(inner) => Value::Aggregate(Self {
                    entries: Self::build_entries(inner, initial)?,
                }),
                Raw::List(items) => {
                    Value::Aggregate(Self::from_keys(Self::collect_keys(items)?, initial))
                }
                leaf => Value::Number(leaf.coerce(initial)?),
            };
            entries.insert(key.clone(), value);
        }

        Ok(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Aggregate
where
    K: Into<Key>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
