use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Declared type of a field, accessor or parameter, by fully qualified name
/// (e.g. `java.lang.String`, `int`, `com.acme.Widget[]`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(transparent)]
pub struct TypeRef(#[schemars(with = "String")] Arc<str>);

impl TypeRef {
    pub const VOID: &'static str = "void";

    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref().trim()))
    }

    pub fn void() -> Self {
        Self::new(Self::VOID)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Name without package or enclosing-type prefix: `java.util.Map$Entry` -> `Entry`.
    pub fn simple_name(&self) -> &str {
        let name = self.name();
        let base = name.split('<').next().unwrap_or(name);
        match base.rfind(|c| c == '.' || c == '$') {
            Some(pos) => &base[pos + 1..],
            None => base,
        }
    }

    pub fn is_void(&self) -> bool {
        self.name() == Self::VOID
    }

    pub fn is_boolean(&self) -> bool {
        self.name() == "boolean"
    }

    /// Lower-camel-case simple name, used as a property name when none is declared.
    pub fn default_property_name(&self) -> String {
        crate::bean::uncapitalize(self.simple_name())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}
