pub mod action;
pub mod bean;
pub mod binding;
pub mod descriptor;
pub mod introspect;
pub mod scope;
pub mod subject;
pub mod types;

// Re-export commonly used types
pub use action::ActionConfig;
pub use binding::{Binding, Direction};
pub use descriptor::{InDescriptor, OutDescriptor, ScopeBundle, ScopeData, Slots};
pub use introspect::{
    ClassDescriptor, FieldDescriptor, MethodDescriptor, ParameterDescriptor, TypeIntrospector,
};
pub use scope::{ParseScopeError, ScopeType};
pub use subject::{ClassId, MethodId, Subject};
pub use types::TypeRef;
