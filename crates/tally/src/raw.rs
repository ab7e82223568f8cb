use crate::{error::Error, key::Key, num::Number};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Raw
///
/// Untyped constructor/patch input: the literal tree handed to the
/// construction and merge surfaces before any coercion has happened. After
/// construction completes, an aggregate only ever holds numbers and nested
/// aggregates.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Raw {
    // Int must precede Float: untagged deserialization tries variants in
    // declaration order, and integer-representable inputs must stay integers.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Raw>),
    Map(BTreeMap<Key, Raw>),
}

impl Raw {
    /// Build a `Raw::Map` from key/value entries.
    #[must_use]
    pub fn from_map<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Key>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    #[must_use]
    pub const fn kind(&self) -> RawKind {
        match self {
            Self::Null => RawKind::Null,
            Self::Bool(_) => RawKind::Bool,
            Self::Int(_) => RawKind::Int,
            Self::Float(_) => RawKind::Float,
            Self::Text(_) => RawKind::Text,
            Self::List(_) => RawKind::List,
            Self::Map(_) => RawKind::Map,
        }
    }

    /// Convert a leaf literal into a number.
    ///
    /// `Null` takes the supplied default. Conversion preference is checked
    /// in a fixed order, float-like before integer-like; everything else is
    /// declared non-convertible and fails naming the value.
    pub fn coerce(&self, default: Number) -> Result<Number, Error> {
        match self {
            Self::Null => Ok(default),
            Self::Float(f) => Ok(Number::Float(*f)),
            Self::Int(i) => Ok(Number::Int(*i)),
            other => Err(Error::TypeConversion {
                kind: other.kind(),
                found: other.to_string(),
            }),
        }
    }

    /// View this literal as an entry key, if it is a key-shaped token.
    #[must_use]
    pub fn as_key(&self) -> Option<Key> {
        match self {
            Self::Int(i) => Some(Key::Int(*i)),
            Self::Text(s) => Some(Key::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

macro_rules! impl_raw_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Raw {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_raw_from! {
    bool   => Bool,
    i8     => Int,
    i16    => Int,
    i32    => Int,
    i64    => Int,
    u8     => Int,
    u16    => Int,
    u32    => Int,
    f32    => Float,
    f64    => Float,
    &str   => Text,
    String => Text,
}

impl From<Number> for Raw {
    fn from(n: Number) -> Self {
        match n {
            Number::Int(i) => Self::Int(i),
            Number::Float(f) => Self::Float(f),
        }
    }
}

impl<T: Into<Self>> From<Vec<T>> for Raw {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

///
/// RawKind
///
/// Coarse input classification, used by coercion routing and error
/// messages.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RawKind {
    Bool,
    Float,
    Int,
    List,
    Map,
    Null,
    Text,
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::List => "list",
            Self::Map => "map",
            Self::Null => "null",
            Self::Text => "text",
        };
        write!(f, "{label}")
    }
}
