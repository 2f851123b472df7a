use crate::bean;
use crate::binding::Binding;
use crate::subject::{ClassId, MethodId};
use crate::types::TypeRef;
use std::sync::Arc;

/// A field visible on a class, including inherited ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub declaring_class: String,
    pub type_ref: TypeRef,
    pub bindings: Vec<Binding>,
}

impl FieldDescriptor {
    pub fn qualified_name(&self) -> String {
        format!("{}#{}", self.declaring_class, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    /// Declared name, when the introspector has it.
    pub name: Option<String>,
    pub type_ref: TypeRef,
    pub bindings: Vec<Binding>,
}

impl ParameterDescriptor {
    /// Property name used for binding: the declared name, or the
    /// lower-camel-case simple type name when the name is unavailable.
    pub fn property_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.type_ref.default_property_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub id: MethodId,
    pub name: String,
    pub declaring_class: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: TypeRef,
    /// Bindings declared on the method itself (meaningful on accessors).
    pub bindings: Vec<Binding>,
}

impl MethodDescriptor {
    pub fn qualified_name(&self) -> String {
        format!("{}#{}", self.declaring_class, self.name)
    }

    pub fn setter_property(&self) -> Option<String> {
        bean::setter_property_name(&self.name, self.parameters.len())
    }

    pub fn getter_property(&self) -> Option<String> {
        bean::getter_property_name(&self.name, self.parameters.len(), &self.return_type)
    }

    /// Name plus parameter types; equal signatures override each other.
    pub fn signature(&self) -> (&str, Vec<&str>) {
        (
            self.name.as_str(),
            self.parameters.iter().map(|p| p.type_ref.name()).collect(),
        )
    }
}

/// Flattened view of a class: all fields and methods across the
/// inheritance chain, in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub id: ClassId,
    pub name: String,
    pub fields: Vec<Arc<FieldDescriptor>>,
    pub methods: Vec<Arc<MethodDescriptor>>,
}

impl ClassDescriptor {
    pub fn find_method(&self, name: &str) -> Option<&Arc<MethodDescriptor>> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Source of member metadata for registered classes and methods.
///
/// Implementations own inheritance flattening and accessor detection;
/// the resolver trusts what they return.
pub trait TypeIntrospector: Send + Sync {
    fn describe_class(&self, id: ClassId) -> Option<Arc<ClassDescriptor>>;

    fn describe_method(&self, id: MethodId) -> Option<Arc<MethodDescriptor>>;
}

impl<T: TypeIntrospector + ?Sized> TypeIntrospector for Arc<T> {
    fn describe_class(&self, id: ClassId) -> Option<Arc<ClassDescriptor>> {
        (**self).describe_class(id)
    }

    fn describe_method(&self, id: MethodId) -> Option<Arc<MethodDescriptor>> {
        (**self).describe_method(id)
    }
}
