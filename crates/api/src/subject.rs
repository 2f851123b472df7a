use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier assigned to a registered action class.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
pub struct ClassId(pub u32);

/// Stable identifier assigned to a declared method.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
pub struct MethodId(pub u32);

/// Key of a cache entry. Class and method key spaces never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Class(ClassId),
    Method(MethodId),
}

impl From<ClassId> for Subject {
    fn from(id: ClassId) -> Self {
        Subject::Class(id)
    }
}

impl From<MethodId> for Subject {
    fn from(id: MethodId) -> Self {
        Subject::Method(id)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::Class(id) => write!(f, "class#{}", id.0),
            Subject::Method(id) => write!(f, "method#{}", id.0),
        }
    }
}
