use crate::{aggregate::Aggregate, key::Key, num::Number, value::Value};
use std::collections::BTreeMap;

impl Aggregate {
    /// Drop every leaf entry the predicate matches, recursing into nested
    /// aggregates. A nested aggregate that ends up empty is dropped from
    /// its parent entirely rather than kept as an empty branch.
    #[must_use]
    pub fn reject<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, Number) -> bool,
    {
        self.reject_inner(&predicate)
    }

    /// Keep only the leaf entries the predicate matches; the exact
    /// complement of [`reject`](Self::reject), pruning included.
    #[must_use]
    pub fn select<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Key, Number) -> bool,
    {
        self.reject_inner(&|key, n| !predicate(key, n))
    }

    pub fn reject_mut<F>(&mut self, predicate: F)
    where
        F: Fn(&Key, Number) -> bool,
    {
        *self = self.reject_inner(&predicate);
    }

    pub fn select_mut<F>(&mut self, predicate: F)
    where
        F: Fn(&Key, Number) -> bool,
    {
        *self = self.select(predicate);
    }

    fn reject_inner(&self, predicate: &impl Fn(&Key, Number) -> bool) -> Self {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            match value {
                Value::Number(n) => {
                    if !predicate(key, *n) {
                        entries.insert(key.clone(), value.clone());
                    }
                }
                Value::Aggregate(inner) => {
                    let pruned = inner.reject_inner(predicate);
                    if !pruned.is_empty() {
                        entries.insert(key.clone(), Value::Aggregate(pruned));
                    }
                }
            }
        }

        Self { entries }
    }
}
