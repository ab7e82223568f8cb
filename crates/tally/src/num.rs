use crate::error::Error;
use derive_more::Display;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::{
    cmp::Ordering,
    fmt,
    ops::{Add, Mul, Neg, Sub},
};

///
/// Number
///
/// Scalar leaf of an aggregate: a signed integer or a float.
///
/// Integers are the preferred representation; an operation only promotes to
/// float when an operand forces it. Equality is variant-strict
/// (`Int(4) != Float(4.0)`); ordering compares numerically across variants.
///

#[derive(Clone, Copy, Debug, Display, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Number {
    // Int must precede Float: untagged deserialization tries variants in
    // declaration order, and integer-representable inputs must stay integers.
    #[display("{_0}")]
    Int(i64),

    #[display("{_0}")]
    Float(f64),
}

impl Number {
    pub const ZERO: Self = Self::Int(0);

    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::Int(_))
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float(_))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }

    /// Numeric view as `f64`.
    ///
    /// Integer magnitudes beyond 2^53 lose precision here; cross-variant
    /// comparison and float promotion share that bound.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Cross-variant numeric comparison; `None` only when NaN is involved.
    ///
    /// Equality stays variant-strict, so this is the ordering surface used
    /// by `min`/`max` rather than a `PartialOrd` impl.
    #[must_use]
    pub fn cmp_numeric(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a + b),
            _ => Self::Float(self.as_f64() + rhs.as_f64()),
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a - b),
            _ => Self::Float(self.as_f64() - rhs.as_f64()),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Int(a), Self::Int(b)) => Self::Int(a * b),
            _ => Self::Float(self.as_f64() * rhs.as_f64()),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Int(i) => Self::Int(-i),
            Self::Float(f) => Self::Float(-f),
        }
    }
}

impl Zero for Number {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        (*self).is_zero()
    }
}

macro_rules! impl_number_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Number {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_number_from! {
    i8  => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8  => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
}

///
/// BinaryOp
///
/// Closed operator tag for broadcast arithmetic. A single [`eval`] dispatch
/// maps each tag to its numeric operation.
///
/// [`eval`]: Self::eval
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BinaryOp {
    Add,
    BitAnd,
    BitOr,
    BitXor,
    Div,
    FloatDiv,
    IntDiv,
    Modulo,
    Mul,
    Pow,
    Quot,
    Rem,
    Remainder,
    Sub,
}

impl BinaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::Div => "/",
            Self::FloatDiv => "fdiv",
            Self::IntDiv => "div",
            Self::Modulo => "modulo",
            Self::Mul => "*",
            Self::Pow => "**",
            Self::Quot => "quo",
            Self::Rem => "%",
            Self::Remainder => "remainder",
            Self::Sub => "-",
        }
    }

    /// Apply the operator to two scalars.
    ///
    /// Integer pairs stay in the integer domain wherever the operator allows
    /// it. Zero divisors error in the integer domain; float divisions follow
    /// native `f64` behavior (±infinity, NaN) and are not special-cased.
    pub fn eval(self, lhs: Number, rhs: Number) -> Result<Number, Error> {
        use Number::{Float, Int};

        let result = match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,

            // Floored division: the quotient rounds toward negative infinity.
            Self::Div => match (lhs, rhs) {
                (Int(a), Int(b)) => Int(div_floor(a, nonzero(b)?)),
                _ => Float(lhs.as_f64() / rhs.as_f64()),
            },

            // Floored: the result takes the divisor's sign.
            Self::Modulo | Self::Rem => match (lhs, rhs) {
                (Int(a), Int(b)) => Int(mod_floor(a, nonzero(b)?)),
                _ => Float(mod_floor_f64(lhs.as_f64(), rhs.as_f64())),
            },

            // Truncated: the result takes the dividend's sign.
            Self::Remainder => match (lhs, rhs) {
                (Int(a), Int(b)) => Int(a % nonzero(b)?),
                _ => Float(lhs.as_f64() % rhs.as_f64()),
            },

            Self::IntDiv => int_div(lhs, rhs)?,
            Self::FloatDiv | Self::Quot => Float(lhs.as_f64() / rhs.as_f64()),
            Self::Pow => pow(lhs, rhs),

            Self::BitAnd => self.bitwise(lhs, rhs, |a, b| a & b)?,
            Self::BitOr => self.bitwise(lhs, rhs, |a, b| a | b)?,
            Self::BitXor => self.bitwise(lhs, rhs, |a, b| a ^ b)?,
        };

        Ok(result)
    }

    fn bitwise(
        self,
        lhs: Number,
        rhs: Number,
        f: impl FnOnce(i64, i64) -> i64,
    ) -> Result<Number, Error> {
        match (lhs, rhs) {
            (Number::Int(a), Number::Int(b)) => Ok(Number::Int(f(a, b))),
            _ => Err(Error::NonIntegerOperand { op: self.symbol() }),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

///
/// UnaryOp
///
/// Elementwise unary operators. The rounding family (`Ceil`, `Floor`,
/// `Round`, `Trunc`) is the identity on integers and yields integers on
/// floats; `Round` rounds half away from zero.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnaryOp {
    Abs,
    BitNot,
    Ceil,
    Floor,
    Identity,
    Neg,
    Round,
    Trunc,
}

impl UnaryOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::BitNot => "~",
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Identity => "+@",
            Self::Neg => "-@",
            Self::Round => "round",
            Self::Trunc => "truncate",
        }
    }

    /// Apply the operator to one scalar.
    pub fn eval(self, n: Number) -> Result<Number, Error> {
        let result = match self {
            Self::Identity => n,
            Self::Neg => -n,

            Self::Abs => match n {
                Number::Int(i) => Number::Int(i.abs()),
                Number::Float(f) => Number::Float(f.abs()),
            },

            Self::BitNot => match n {
                Number::Int(i) => Number::Int(!i),
                Number::Float(_) => {
                    return Err(Error::NonIntegerOperand { op: self.symbol() });
                }
            },

            Self::Ceil => to_int(n, f64::ceil),
            Self::Floor => to_int(n, f64::floor),
            Self::Round => to_int(n, f64::round),
            Self::Trunc => to_int(n, f64::trunc),
        };

        Ok(result)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

const fn nonzero(divisor: i64) -> Result<i64, Error> {
    if divisor == 0 {
        Err(Error::DivisionByZero)
    } else {
        Ok(divisor)
    }
}

const fn div_floor(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) { q - 1 } else { q }
}

const fn mod_floor(a: i64, b: i64) -> i64 {
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) { r + b } else { r }
}

fn mod_floor_f64(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

/// Floored quotient as an integer, regardless of operand representation.
/// A zero divisor always errors here, float operands included.
#[expect(clippy::cast_possible_truncation)]
fn int_div(lhs: Number, rhs: Number) -> Result<Number, Error> {
    if rhs.is_zero() {
        return Err(Error::DivisionByZero);
    }

    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => Ok(Number::Int(div_floor(a, b))),
        _ => Ok(Number::Int((lhs.as_f64() / rhs.as_f64()).floor() as i64)),
    }
}

fn pow(lhs: Number, rhs: Number) -> Number {
    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) if b >= 0 => {
            match u32::try_from(b).ok().and_then(|exp| a.checked_pow(exp)) {
                Some(v) => Number::Int(v),
                // out of integer range: promote
                None => Number::Float(lhs.as_f64().powf(rhs.as_f64())),
            }
        }
        _ => Number::Float(lhs.as_f64().powf(rhs.as_f64())),
    }
}

/// Rounding family dispatch: identity on integers, integer result on floats.
#[expect(clippy::cast_possible_truncation)]
fn to_int(n: Number, round: fn(f64) -> f64) -> Number {
    match n {
        Number::Int(_) => n,
        Number::Float(f) => Number::Int(round(f) as i64),
    }
}
