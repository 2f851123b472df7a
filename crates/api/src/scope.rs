use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage contexts a value can be read from or written back to.
///
/// The set is closed: `index()` is a stable ordinal used to address the
/// per-scope slots of a [`crate::ScopeData`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScopeType {
    Request,
    Session,
    Application,
    Servlet,
    Context,
}

impl ScopeType {
    pub const COUNT: usize = 5;

    /// All scopes in ordinal order.
    pub const ALL: [ScopeType; Self::COUNT] = [
        ScopeType::Request,
        ScopeType::Session,
        ScopeType::Application,
        ScopeType::Servlet,
        ScopeType::Context,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScopeType::Request => "request",
            ScopeType::Session => "session",
            ScopeType::Application => "application",
            ScopeType::Servlet => "servlet",
            ScopeType::Context => "context",
        }
    }
}

impl fmt::Display for ScopeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scope: {0}")]
pub struct ParseScopeError(pub String);

impl FromStr for ScopeType {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        ScopeType::ALL
            .into_iter()
            .find(|scope| scope.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseScopeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        for (i, scope) in ScopeType::ALL.iter().enumerate() {
            assert_eq!(scope.index(), i);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Session".parse::<ScopeType>(), Ok(ScopeType::Session));
        assert_eq!(" request ".parse::<ScopeType>(), Ok(ScopeType::Request));
        assert!("path".parse::<ScopeType>().is_err());
    }
}
