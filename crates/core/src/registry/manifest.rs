//! Declarative binding manifests.
//!
//! A manifest lists classes with their declared members and bindings. It is
//! the serialized form of what [`super::ClassRegistryBuilder`] accepts.

use schemars::JsonSchema;
use scopebind_api::{Binding, TypeRef};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, JsonSchema)]
pub struct Manifest {
    #[serde(default)]
    pub classes: Vec<ClassSpec>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ClassSpec {
    /// Fully qualified class name.
    pub name: String,
    /// Fully qualified name of the superclass, if it is registered too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

impl ClassSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extends: None,
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn extends(mut self, superclass: impl Into<String>) -> Self {
        self.extends = Some(superclass.into());
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
        bindings: impl IntoIterator<Item = Binding>,
    ) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            type_ref: type_ref.into(),
            bindings: bindings.into_iter().collect(),
        });
        self
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct MethodSpec {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default = "TypeRef::void", rename = "returns")]
    pub return_type: TypeRef,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: TypeRef::void(),
            bindings: Vec::new(),
        }
    }

    pub fn param(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn returns(mut self, type_ref: impl Into<TypeRef>) -> Self {
        self.return_type = type_ref.into();
        self
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParameterSpec {
    /// Declared parameter name; often unavailable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

impl ParameterSpec {
    pub fn new(type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: None,
            type_ref: type_ref.into(),
            bindings: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn binding(mut self, binding: Binding) -> Self {
        self.bindings.push(binding);
        self
    }
}
