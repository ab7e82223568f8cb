use crate::{
    aggregate::Aggregate,
    error::Error,
    num::{BinaryOp, Number, UnaryOp},
    value::Value,
};
use std::{
    collections::BTreeMap,
    convert::Infallible,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub},
};

impl Aggregate {
    /// Broadcast a binary operator across this aggregate and `rhs`.
    ///
    /// A scalar right operand recombines every value through its coercion,
    /// so nested aggregates contribute their totals. An aggregate right
    /// operand recombines only the keys it enumerates: a nested slot
    /// dispatches recursively against the incoming value; any other slot
    /// coerces (absent keys coerce to [`Self::DEFAULT_INITIAL`]) and either
    /// combines scalar-to-scalar or broadcasts as the left operand across
    /// every leaf of the incoming nested aggregate. Keys present only in
    /// the receiver are carried over untouched, without recomputation.
    pub fn apply(&self, op: BinaryOp, rhs: &Value) -> Result<Self, Error> {
        self.combine_with(rhs, &|a, b| op.eval(a, b))
    }

    /// In-place [`apply`](Self::apply); the receiver is untouched on error.
    pub fn apply_mut(&mut self, op: BinaryOp, rhs: &Value) -> Result<(), Error> {
        *self = self.apply(op, rhs)?;

        Ok(())
    }

    /// Map a unary operator independently over every value, recursing into
    /// nested aggregates.
    pub fn apply_unary(&self, op: UnaryOp) -> Result<Self, Error> {
        self.map_with(&|n| op.eval(n))
    }

    /// In-place [`apply_unary`](Self::apply_unary); the receiver is
    /// untouched on error.
    pub fn apply_unary_mut(&mut self, op: UnaryOp) -> Result<(), Error> {
        *self = self.apply_unary(op)?;

        Ok(())
    }

    pub(crate) fn combine_with<E>(
        &self,
        rhs: &Value,
        f: &impl Fn(Number, Number) -> Result<Number, E>,
    ) -> Result<Self, E> {
        match rhs {
            Value::Number(n) => self.combine_scalar(*n, f),
            Value::Aggregate(other) => self.combine_aggregate(other, f),
        }
    }

    fn combine_scalar<E>(
        &self,
        rhs: Number,
        f: &impl Fn(Number, Number) -> Result<Number, E>,
    ) -> Result<Self, E> {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            entries.insert(key.clone(), Value::Number(f(value.to_number(), rhs)?));
        }

        Ok(Self { entries })
    }

    fn combine_aggregate<E>(
        &self,
        other: &Self,
        f: &impl Fn(Number, Number) -> Result<Number, E>,
    ) -> Result<Self, E> {
        let mut out = self.clone();
        for (key, incoming) in &other.entries {
            let combined = match out.entries.get(key) {
                Some(Value::Aggregate(inner)) => Value::Aggregate(inner.combine_with(incoming, f)?),
                slot => {
                    let lhs = slot.map_or(Self::DEFAULT_INITIAL, Value::to_number);
                    match incoming {
                        Value::Number(n) => Value::Number(f(lhs, *n)?),
                        Value::Aggregate(inner) => Value::Aggregate(inner.broadcast_left(lhs, f)?),
                    }
                }
            };
            out.entries.insert(key.clone(), combined);
        }

        Ok(out)
    }

    /// `lhs` fixed as the left operand, mapped across every leaf of `self`.
    fn broadcast_left<E>(
        &self,
        lhs: Number,
        f: &impl Fn(Number, Number) -> Result<Number, E>,
    ) -> Result<Self, E> {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            let mapped = match value {
                Value::Number(n) => Value::Number(f(lhs, *n)?),
                Value::Aggregate(inner) => Value::Aggregate(inner.broadcast_left(lhs, f)?),
            };
            entries.insert(key.clone(), mapped);
        }

        Ok(Self { entries })
    }

    pub(crate) fn map_with<E>(
        &self,
        f: &impl Fn(Number) -> Result<Number, E>,
    ) -> Result<Self, E> {
        let mut entries = BTreeMap::new();
        for (key, value) in &self.entries {
            let mapped = match value {
                Value::Number(n) => Value::Number(f(*n)?),
                Value::Aggregate(inner) => Value::Aggregate(inner.map_with(f)?),
            };
            entries.insert(key.clone(), mapped);
        }

        Ok(Self { entries })
    }
}

fn into_ok<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl Add for &Aggregate {
    type Output = Aggregate;

    fn add(self, rhs: Self) -> Aggregate {
        into_ok(self.combine_aggregate(rhs, &|a, b| Ok::<_, Infallible>(a + b)))
    }
}

impl Sub for &Aggregate {
    type Output = Aggregate;

    fn sub(self, rhs: Self) -> Aggregate {
        into_ok(self.combine_aggregate(rhs, &|a, b| Ok::<_, Infallible>(a - b)))
    }
}

impl Mul for &Aggregate {
    type Output = Aggregate;

    fn mul(self, rhs: Self) -> Aggregate {
        into_ok(self.combine_aggregate(rhs, &|a, b| Ok::<_, Infallible>(a * b)))
    }
}

impl Add<Number> for &Aggregate {
    type Output = Aggregate;

    fn add(self, rhs: Number) -> Aggregate {
        into_ok(self.combine_scalar(rhs, &|a, b| Ok::<_, Infallible>(a + b)))
    }
}

impl Sub<Number> for &Aggregate {
    type Output = Aggregate;

    fn sub(self, rhs: Number) -> Aggregate {
        into_ok(self.combine_scalar(rhs, &|a, b| Ok::<_, Infallible>(a - b)))
    }
}

impl Mul<Number> for &Aggregate {
    type Output = Aggregate;

    fn mul(self, rhs: Number) -> Aggregate {
        into_ok(self.combine_scalar(rhs, &|a, b| Ok::<_, Infallible>(a * b)))
    }
}

impl Neg for &Aggregate {
    type Output = Aggregate;

    fn neg(self) -> Aggregate {
        into_ok(self.map_with(&|n| Ok::<_, Infallible>(-n)))
    }
}

// Summing a collection folds with `+`; an empty collection sums to the
// empty aggregate.
impl Sum for Aggregate {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, next| &acc + &next)
    }
}

impl<'a> Sum<&'a Aggregate> for Aggregate {
    fn sum<I: Iterator<Item = &'a Aggregate>>(iter: I) -> Self {
        iter.fold(Self::new(), |acc, next| &acc + next)
    }
}
