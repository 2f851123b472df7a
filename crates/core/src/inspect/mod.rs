//! Derives per-scope descriptor bundles from declared bindings.
//!
//! Inspection is a pure function of a subject's declarations: the same
//! subject always yields an equal [`ScopeData`]. Validation runs before any
//! scope is scanned, so a conflicting declaration never produces a partial
//! result.

mod class;
mod method;

pub use class::inspect_class;
pub use method::inspect_method;

use crate::error::{Result, ScopeDataError};
use scopebind_api::{
    Binding, Direction, InDescriptor, OutDescriptor, ScopeData, ScopeType, Subject,
    TypeIntrospector, TypeRef,
};

/// Inspect whatever `subject` names.
pub fn inspect_subject(subject: Subject, introspector: &dyn TypeIntrospector) -> Result<ScopeData> {
    match subject {
        Subject::Class(id) => {
            let class = introspector
                .describe_class(id)
                .ok_or_else(|| ScopeDataError::InvalidSubject(subject.to_string()))?;
            inspect_class(&class)
        }
        Subject::Method(id) => {
            let method = introspector
                .describe_method(id)
                .ok_or_else(|| ScopeDataError::InvalidSubject(subject.to_string()))?;
            inspect_method(&method)
        }
    }
}

/// The binding as an input descriptor, if it reads and targets `scope`.
pub(crate) fn resolve_in(
    binding: &Binding,
    scope: ScopeType,
    property: &str,
    type_ref: &TypeRef,
) -> Option<InDescriptor> {
    if !binding.direction.reads() || binding.scope != scope {
        return None;
    }
    let (name, target) = name_and_target(binding, property);
    Some(InDescriptor {
        name,
        target,
        type_ref: type_ref.clone(),
        create: binding.create,
    })
}

/// The binding as an output descriptor, if it writes and targets `scope`.
pub(crate) fn resolve_out(
    binding: &Binding,
    scope: ScopeType,
    property: &str,
    type_ref: &TypeRef,
) -> Option<OutDescriptor> {
    if !binding.direction.writes() || binding.scope != scope {
        return None;
    }
    let (name, target) = name_and_target(binding, property);
    Some(OutDescriptor {
        name,
        target,
        type_ref: type_ref.clone(),
    })
}

fn name_and_target(binding: &Binding, property: &str) -> (String, Option<String>) {
    match binding.override_name() {
        Some(name) => (name.to_string(), Some(property.to_string())),
        None => (property.to_string(), None),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Input,
    Output,
}

impl Side {
    fn plain(self) -> Direction {
        match self {
            Side::Input => Direction::In,
            Side::Output => Direction::Out,
        }
    }
}

/// A member may carry at most one binding per side, and never a plain
/// directional binding together with a combined one.
pub(crate) fn check_side(member: &str, bindings: &[Binding], side: Side) -> Result<()> {
    let plain = side.plain();
    let plain_count = bindings.iter().filter(|b| b.direction == plain).count();
    let combined_count = bindings.iter().filter(|b| b.direction.is_combined()).count();

    if plain_count > 0 && combined_count > 0 {
        return Err(ScopeDataError::conflict(
            member,
            format!(
                "{} binding can not be used with {} binding",
                Direction::InOut.as_str(),
                plain.as_str()
            ),
        ));
    }
    if plain_count > 1 || combined_count > 1 {
        let direction = if plain_count > 1 { plain } else { Direction::InOut };
        return Err(ScopeDataError::conflict(
            member,
            format!("more than one {} binding", direction.as_str()),
        ));
    }
    Ok(())
}
