use super::{resolve_in, resolve_out};
use crate::error::{Result, ScopeDataError};
use scopebind_api::{MethodDescriptor, ScopeBundle, ScopeData, ScopeType};
use tracing::debug;

/// Scans method parameters for every scope. Slots keep parameter positions;
/// a parameter that does not bind in a scope leaves a hole there.
pub fn inspect_method(method: &MethodDescriptor) -> Result<ScopeData> {
    validate(method)?;
    let data = ScopeData::collect(|scope| scan(method, scope));
    debug!(
        method = %method.qualified_name(),
        parameters = method.parameters.len(),
        scopes = data.populated_scopes(),
        "inspected method bindings"
    );
    Ok(data)
}

/// Every parameter carries exactly one binding.
fn validate(method: &MethodDescriptor) -> Result<()> {
    for (position, parameter) in method.parameters.iter().enumerate() {
        match parameter.bindings.len() {
            0 => {
                return Err(ScopeDataError::UnmarkedParameter {
                    method: method.qualified_name(),
                    position,
                });
            }
            1 => {}
            count => {
                return Err(ScopeDataError::conflict(
                    format!("{} parameter {}", method.qualified_name(), position),
                    format!("{count} bindings declared, expected exactly one"),
                ));
            }
        }
    }
    Ok(())
}

fn scan(method: &MethodDescriptor, scope: ScopeType) -> Option<ScopeBundle> {
    let count = method.parameters.len();
    let mut input = Vec::with_capacity(count);
    let mut output = Vec::with_capacity(count);

    for parameter in &method.parameters {
        let property = parameter.property_name();
        let binding = parameter.bindings.first();
        input.push(binding.and_then(|b| resolve_in(b, scope, &property, &parameter.type_ref)));
        output.push(binding.and_then(|b| resolve_out(b, scope, &property, &parameter.type_ref)));
    }

    ScopeBundle::from_slots(input, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopebind_api::{Binding, MethodId, ParameterDescriptor, TypeRef};

    fn parameter(type_name: &str, bindings: Vec<Binding>) -> ParameterDescriptor {
        ParameterDescriptor {
            name: None,
            type_ref: TypeRef::new(type_name),
            bindings,
        }
    }

    fn method(parameters: Vec<ParameterDescriptor>) -> MethodDescriptor {
        MethodDescriptor {
            id: MethodId(0),
            name: "save".to_string(),
            declaring_class: "com.acme.WidgetAction".to_string(),
            parameters,
            return_type: TypeRef::new("java.lang.String"),
            bindings: Vec::new(),
        }
    }

    #[test]
    fn test_positions_are_preserved() {
        let data = inspect_method(&method(vec![
            parameter("long", vec![Binding::input(ScopeType::Request).named("id")]),
            parameter("com.acme.WidgetForm", vec![Binding::output(ScopeType::Request)]),
            parameter("java.util.Locale", vec![Binding::input(ScopeType::Session)]),
        ]))
        .unwrap();

        let request = data.bundle(ScopeType::Request).unwrap();
        let input = request.input.as_ref().unwrap();
        assert_eq!(input.len(), 3);
        assert_eq!(input[0].as_ref().unwrap().name, "id");
        assert_eq!(input[0].as_ref().unwrap().target.as_deref(), Some("long"));
        assert!(input[1].is_none());
        assert!(input[2].is_none());

        let output = request.output.as_ref().unwrap();
        assert!(output[0].is_none());
        let form = output[1].as_ref().unwrap();
        assert_eq!(form.name, "widgetForm");
        assert_eq!(form.target, None);
        assert_eq!(form.type_ref.name(), "com.acme.WidgetForm");

        let session = data.bundle(ScopeType::Session).unwrap();
        assert!(session.output.is_none());
        assert_eq!(session.inputs().next().unwrap().name, "locale");
    }

    #[test]
    fn test_declared_parameter_name_wins() {
        let mut named = parameter("long", vec![Binding::input(ScopeType::Request)]);
        named.name = Some("widgetId".to_string());
        let data = inspect_method(&method(vec![named])).unwrap();
        let input = data.bundle(ScopeType::Request).unwrap().inputs().next().unwrap().clone();
        assert_eq!(input.name, "widgetId");
    }

    #[test]
    fn test_unmarked_parameter_fails() {
        let err = inspect_method(&method(vec![
            parameter("long", vec![Binding::input(ScopeType::Request)]),
            parameter("java.lang.String", vec![]),
        ]))
        .unwrap_err();
        match err {
            ScopeDataError::UnmarkedParameter { method, position } => {
                assert_eq!(method, "com.acme.WidgetAction#save");
                assert_eq!(position, 1);
            }
            other => panic!("expected unmarked parameter, got {other:?}"),
        }
    }

    #[test]
    fn test_parameter_with_two_bindings_fails() {
        let err = inspect_method(&method(vec![parameter(
            "long",
            vec![
                Binding::input(ScopeType::Request),
                Binding::output(ScopeType::Request),
            ],
        )]))
        .unwrap_err();
        assert!(matches!(err, ScopeDataError::Conflict { .. }));
    }

    #[test]
    fn test_method_without_parameters_is_empty() {
        assert!(inspect_method(&method(vec![])).unwrap().is_empty());
    }
}
