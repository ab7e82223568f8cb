use crate::{
    aggregate::Aggregate,
    error::{Error, StructureMismatchError},
    key::Key,
    raw::Raw,
    value::Value,
};
use std::collections::{BTreeMap, btree_map::Entry};

impl Aggregate {
    /// Merge `other` into a copy of this aggregate.
    ///
    /// Nested aggregate meets nested aggregate → recursive merge; anything
    /// else is replaced by the incoming value. Keys only in the receiver are
    /// preserved unchanged.
    #[must_use]
    pub fn deep_merge(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.merge_entries(other);
        out
    }

    /// In-place [`deep_merge`](Self::deep_merge).
    pub fn deep_merge_mut(&mut self, other: &Self) {
        self.merge_entries(other);
    }

    /// [`deep_merge`](Self::deep_merge), but only if `other` is a
    /// structural subset of the receiver: every incoming key path must
    /// already exist with a compatible shape. The check runs to completion
    /// before any entry is written.
    pub fn deep_merge_matching(&self, other: &Self) -> Result<Self, Error> {
        self.check_structure(other)?;

        Ok(self.deep_merge(other))
    }

    /// In-place [`deep_merge_matching`](Self::deep_merge_matching); the
    /// receiver is untouched on error.
    pub fn deep_merge_matching_mut(&mut self, other: &Self) -> Result<(), Error> {
        self.check_structure(other)?;
        self.merge_entries(other);

        Ok(())
    }

    /// Verify that `other`'s key/shape tree is a subset of this one:
    /// a number must meet a number, a nested aggregate a nested aggregate,
    /// recursively.
    pub fn check_structure(&self, other: &Self) -> Result<(), StructureMismatchError> {
        for (key, incoming) in &other.entries {
            match (self.entries.get(key), incoming) {
                (None, _) => {
                    return Err(StructureMismatchError::UnknownKey { key: key.clone() });
                }
                (Some(Value::Aggregate(current)), Value::Aggregate(inner)) => {
                    current
                        .check_structure(inner)
                        .map_err(|err| err.with_key(key))?;
                }
                (Some(Value::Number(_)), Value::Number(_)) => {}
                (Some(current), incoming) => {
                    return Err(StructureMismatchError::Shape {
                        expected: current.shape(),
                        actual: incoming.shape(),
                    }
                    .with_key(key));
                }
            }
        }

        Ok(())
    }

    /// Sanitize a raw patch mapping into an aggregate: nested maps become
    /// nested aggregates, scalars coerce (`Null` to zero), and anything
    /// without a numeric conversion fails naming the value.
    pub fn from_patch(patch: &Raw) -> Result<Self, Error> {
        match patch {
            Raw::Map(map) => Self::sanitize_map(map),
            other => Err(Error::InvalidContents { kind: other.kind() }),
        }
    }

    fn sanitize_map(map: &BTreeMap<Key, Raw>) -> Result<Self, Error> {
        let mut entries = BTreeMap::new();
        for (key, raw) in map {
            let value = match raw {
                Raw::Map(inner) => Value::Aggregate(Self::sanitize_map(inner)?),
                leaf => Value::Number(leaf.coerce(Self::DEFAULT_INITIAL)?),
            };
            entries.insert(key.clone(), value);
        }

        Ok(Self { entries })
    }

    fn merge_entries(&mut self, other: &Self) {
        for (key, incoming) in &other.entries {
            match self.entries.entry(key.clone()) {
                Entry::Occupied(mut slot) => match (slot.get_mut(), incoming) {
                    (Value::Aggregate(current), Value::Aggregate(inner)) => {
                        current.merge_entries(inner);
                    }
                    (slot_value, _) => *slot_value = incoming.clone(),
                },
                Entry::Vacant(slot) => {
                    slot.insert(incoming.clone());
                }
            }
        }
    }
}
