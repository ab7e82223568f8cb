use crate::{aggregate::Aggregate, num::Number};
use serde::{Deserialize, Serialize};

///
/// Value
///
/// A single aggregate slot: a scalar number or a nested aggregate. The
/// tagged union is what lets the structure nest without the container
/// doubling as its own element type.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Number(Number),
    Aggregate(Aggregate),
}

impl Value {
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate(_))
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<Number> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn as_aggregate(&self) -> Option<&Aggregate> {
        if let Self::Aggregate(a) = self {
            Some(a)
        } else {
            None
        }
    }

    /// Total coercion: a number is returned unchanged, a nested aggregate
    /// reduces to its recursive total.
    #[must_use]
    pub fn to_number(&self) -> Number {
        match self {
            Self::Number(n) => *n,
            Self::Aggregate(a) => a.total(),
        }
    }

    pub(crate) const fn shape(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Aggregate(_) => "aggregate",
        }
    }
}

impl From<Aggregate> for Value {
    fn from(a: Aggregate) -> Self {
        Self::Aggregate(a)
    }
}

macro_rules! impl_value_from {
    ( $( $type:ty ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::Number(v.into())
                }
            }
        )*
    };
}

impl_value_from! {
    Number, i8, i16, i32, i64, u8, u16, u32, f32, f64,
}
