use crate::{key::Key, raw::RawKind};
use thiserror::Error as ThisError;

///
/// Error
///
/// Crate-level failure taxonomy. Every fallible operation reports through
/// this enum; float-domain results (infinity, NaN) are not errors and follow
/// native `f64` behavior.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,

    #[error("aggregate contents must be a key list or a mapping, found {kind}")]
    InvalidContents { kind: RawKind },

    #[error("aggregate key must be an integer or text token, found {kind}")]
    InvalidKey { kind: RawKind },

    #[error("operator `{op}` requires integer operands")]
    NonIntegerOperand { op: &'static str },

    #[error(transparent)]
    StructureMismatch(#[from] StructureMismatchError),

    #[error("cannot convert {found} ({kind}) to a number")]
    TypeConversion { kind: RawKind, found: String },
}

///
/// StructureMismatchError
///
/// Structured failures for structure-matching merges. Carries a dotted key
/// path (`a.b.c`) naming where in the target tree the incoming data stopped
/// being a compatible subset.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum StructureMismatchError {
    #[error("structure mismatch at {path}: {source}")]
    Context {
        path: String,
        #[source]
        source: Box<Self>,
    },

    #[error("shape mismatch: expected {expected}, found {actual}")]
    Shape {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("incoming key not present in target: {key}")]
    UnknownKey { key: Key },
}

impl StructureMismatchError {
    /// Prepend a key segment to the mismatch path.
    #[must_use]
    pub fn with_key(self, key: &Key) -> Self {
        self.with_path_segment(key.to_string())
    }

    /// Return the full contextual path, if available.
    #[must_use]
    pub const fn path(&self) -> Option<&str> {
        match self {
            Self::Context { path, .. } => Some(path.as_str()),
            _ => None,
        }
    }

    /// Return the innermost, non-context mismatch variant.
    #[must_use]
    pub fn leaf(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.leaf(),
            _ => self,
        }
    }

    #[must_use]
    fn with_path_segment(self, segment: String) -> Self {
        match self {
            Self::Context { path, source } => Self::Context {
                path: format!("{segment}.{path}"),
                source,
            },
            source => Self::Context {
                path: segment,
                source: Box::new(source),
            },
        }
    }
}
