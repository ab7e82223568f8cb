use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Key
///
/// Entry key for an aggregate: an integer or text token.
///
/// Keys order canonically by variant (integers before text), then by the
/// natural order within the variant; aggregate iteration follows this order
/// deterministically.
///

#[derive(
    Clone, Debug, Display, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(untagged)]
pub enum Key {
    #[display("{_0}")]
    Int(i64),

    #[display("{_0}")]
    Text(String),
}

macro_rules! impl_key_from {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Key {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_key_from! {
    i8     => Int,
    i16    => Int,
    i32    => Int,
    i64    => Int,
    u8     => Int,
    u16    => Int,
    u32    => Int,
    &str   => Text,
    String => Text,
}
