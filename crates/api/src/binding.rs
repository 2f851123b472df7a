use crate::scope::ScopeType;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which way a binding moves values between a scope and a member.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Read from the scope before invocation.
    In,
    /// Written to the scope after invocation.
    Out,
    /// Combined declaration, interpreted once as `In` and once as `Out`.
    InOut,
}

impl Direction {
    pub fn reads(self) -> bool {
        matches!(self, Direction::In | Direction::InOut)
    }

    pub fn writes(self) -> bool {
        matches!(self, Direction::Out | Direction::InOut)
    }

    pub fn is_combined(self) -> bool {
        self == Direction::InOut
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
            Direction::InOut => "inout",
        }
    }
}

/// One declarative binding attached to a field, accessor or parameter.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
pub struct Binding {
    pub direction: Direction,
    pub scope: ScopeType,
    /// Override name in the scope. Blank means "use the member name".
    #[serde(default)]
    pub value: String,
    /// Whether the binder may instantiate a missing value. Ignored for `Out`.
    #[serde(default = "default_create")]
    pub create: bool,
}

fn default_create() -> bool {
    true
}

impl Binding {
    pub fn new(direction: Direction, scope: ScopeType) -> Self {
        Self {
            direction,
            scope,
            value: String::new(),
            create: default_create(),
        }
    }

    pub fn input(scope: ScopeType) -> Self {
        Self::new(Direction::In, scope)
    }

    pub fn output(scope: ScopeType) -> Self {
        Self::new(Direction::Out, scope)
    }

    pub fn in_out(scope: ScopeType) -> Self {
        Self::new(Direction::InOut, scope)
    }

    pub fn named(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_create(mut self, create: bool) -> Self {
        self.create = create;
        self
    }

    /// The trimmed override name, if one was given.
    pub fn override_name(&self) -> Option<&str> {
        let value = self.value.trim();
        (!value.is_empty()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_name_is_trimmed() {
        let binding = Binding::input(ScopeType::Request).named("  widgetId ");
        assert_eq!(binding.override_name(), Some("widgetId"));
        assert_eq!(Binding::input(ScopeType::Request).named("   ").override_name(), None);
    }

    #[test]
    fn test_manifest_defaults() {
        let binding: Binding =
            serde_json::from_str(r#"{"direction":"inout","scope":"session"}"#).unwrap();
        assert_eq!(binding, Binding::in_out(ScopeType::Session));
        assert!(binding.create);
        assert!(binding.direction.reads() && binding.direction.writes());
    }
}
