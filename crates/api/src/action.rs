use crate::introspect::MethodDescriptor;
use crate::subject::{ClassId, MethodId};
use serde::{Deserialize, Serialize};

/// The parts of an action registration the resolver needs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionConfig {
    pub action_class: ClassId,
    pub action_method: MethodId,
    /// False when the action method takes no bound arguments; method-level
    /// inspection is skipped for such actions.
    pub has_method_arguments: bool,
}

impl ActionConfig {
    pub fn new(action_class: ClassId, action_method: MethodId, has_method_arguments: bool) -> Self {
        Self {
            action_class,
            action_method,
            has_method_arguments,
        }
    }

    /// Derives the arguments flag from the method's parameter list.
    pub fn for_method(action_class: ClassId, method: &MethodDescriptor) -> Self {
        Self::new(action_class, method.id, !method.parameters.is_empty())
    }
}
