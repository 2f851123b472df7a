use super::{Side, check_side, resolve_in, resolve_out};
use crate::error::Result;
use scopebind_api::{ClassDescriptor, ScopeBundle, ScopeData, ScopeType};
use tracing::{debug, warn};

/// Scans fields, setters and getters of a class for every scope.
pub fn inspect_class(class: &ClassDescriptor) -> Result<ScopeData> {
    validate(class)?;
    let data = ScopeData::collect(|scope| scan(class, scope));
    debug!(
        class = %class.name,
        scopes = data.populated_scopes(),
        "inspected class bindings"
    );
    Ok(data)
}

fn validate(class: &ClassDescriptor) -> Result<()> {
    for field in &class.fields {
        let member = field.qualified_name();
        check_side(&member, &field.bindings, Side::Input)?;
        check_side(&member, &field.bindings, Side::Output)?;
    }

    for method in &class.methods {
        if method.bindings.is_empty() {
            continue;
        }
        let is_setter = method.setter_property().is_some();
        let is_getter = method.getter_property().is_some();
        if is_setter {
            check_side(&method.qualified_name(), &method.bindings, Side::Input)?;
        }
        if is_getter {
            check_side(&method.qualified_name(), &method.bindings, Side::Output)?;
        }
        if !is_setter && !is_getter {
            warn!(
                "bindings on {} ignored: not a bean accessor",
                method.qualified_name()
            );
        }
    }
    Ok(())
}

fn scan(class: &ClassDescriptor, scope: ScopeType) -> Option<ScopeBundle> {
    let capacity = class.fields.len() + class.methods.len();
    let mut input = Vec::with_capacity(capacity);
    let mut output = Vec::with_capacity(capacity);

    for field in &class.fields {
        for binding in &field.bindings {
            input.extend(resolve_in(binding, scope, &field.name, &field.type_ref));
            output.extend(resolve_out(binding, scope, &field.name, &field.type_ref));
        }
    }

    for method in &class.methods {
        if method.bindings.is_empty() {
            continue;
        }
        if let (Some(property), Some(parameter)) =
            (method.setter_property(), method.parameters.first())
        {
            for binding in &method.bindings {
                input.extend(resolve_in(binding, scope, &property, &parameter.type_ref));
            }
        }
        if let Some(property) = method.getter_property() {
            for binding in &method.bindings {
                output.extend(resolve_out(binding, scope, &property, &method.return_type));
            }
        }
    }

    ScopeBundle::from_descriptors(input, output)
}
