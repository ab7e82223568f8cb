use crate::{aggregate::Aggregate, key::Key, num::Number, value::Value};
use std::cmp::Ordering;

impl Aggregate {
    /// Recursive total: the sum of every coerced value, nested aggregates
    /// contributing their own totals. An empty aggregate totals to integer
    /// zero.
    #[must_use]
    pub fn total(&self) -> Number {
        self.entries
            .values()
            .fold(Number::ZERO, |acc, value| acc + value.to_number())
    }

    /// Collapse one level of nesting: same keys, every value replaced by its
    /// coercion.
    #[must_use]
    pub fn compress(&self) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| (key.clone(), Value::Number(value.to_number())))
            .collect();

        Self { entries }
    }

    pub fn compress_mut(&mut self) {
        for value in self.entries.values_mut() {
            *value = Value::Number(value.to_number());
        }
    }

    /// Normalize so the total becomes `1.0`.
    #[must_use]
    pub fn normalize(&self) -> Self {
        self.normalize_to(1.0)
    }

    /// Normalize so the total becomes `100.0`.
    #[must_use]
    pub fn to_percent(&self) -> Self {
        self.normalize_to(100.0)
    }

    /// Scale every value by `magnitude / total()`, producing floats.
    ///
    /// A zero-total aggregate uses a scale factor of exactly `0.0`, so every
    /// result value is exactly zero rather than infinity or NaN.
    #[must_use]
    pub fn normalize_to(&self, magnitude: f64) -> Self {
        let total = self.total();
        let scale = if total.is_zero() {
            0.0
        } else {
            magnitude / total.as_f64()
        };

        let entries = self
            .entries
            .iter()
            .map(|(key, value)| {
                (
                    key.clone(),
                    Value::Number(value.to_number() * Number::Float(scale)),
                )
            })
            .collect();

        Self { entries }
    }

    pub fn normalize_mut(&mut self) {
        *self = self.normalize();
    }

    pub fn normalize_to_mut(&mut self, magnitude: f64) {
        *self = self.normalize_to(magnitude);
    }

    /// Smallest entry of the compressed view, `None` when empty.
    /// Ties resolve to the first entry in key order.
    #[must_use]
    pub fn min(&self) -> Option<(Key, Number)> {
        self.compressed_entries()
            .min_by(|(_, a), (_, b)| a.cmp_numeric(*b).unwrap_or(Ordering::Equal))
    }

    /// Largest entry of the compressed view, `None` when empty.
    /// Ties resolve to the last entry in key order.
    #[must_use]
    pub fn max(&self) -> Option<(Key, Number)> {
        self.compressed_entries()
            .max_by(|(_, a), (_, b)| a.cmp_numeric(*b).unwrap_or(Ordering::Equal))
    }

    fn compressed_entries(&self) -> impl Iterator<Item = (Key, Number)> + '_ {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_number()))
    }
}
