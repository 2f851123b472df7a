use scopebind_api::{ActionConfig, InDescriptor, OutDescriptor, ScopeType, Slots};
use scopebind_core::{ClassRegistry, ScopeDataResolver};
use std::path::Path;
use std::sync::Arc;
use tabled::{Table, Tabled, settings::Style};

#[derive(Tabled)]
struct DescriptorRow {
    #[tabled(rename = "Scope")]
    scope: ScopeType,
    #[tabled(rename = "Dir")]
    direction: &'static str,
    #[tabled(rename = "Slot")]
    slot: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Create")]
    create: String,
}

pub fn run(
    manifest: &Path,
    class: &str,
    method: Option<&str>,
    scope: Option<ScopeType>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(ClassRegistry::load_manifest(manifest)?);
    let class_id = registry
        .class_id(class)
        .ok_or_else(|| format!("class not found: {}", class))?;
    let action = match method {
        Some(name) => {
            let method = registry
                .find_method(class_id, name)
                .ok_or_else(|| format!("method not found: {}#{}", class, name))?;
            Some(ActionConfig::for_method(class_id, method))
        }
        None => None,
    };

    let resolver = ScopeDataResolver::new(registry.clone());
    let scopes = match scope {
        Some(scope) => vec![scope],
        None => ScopeType::ALL.to_vec(),
    };

    let mut rows = Vec::new();
    let mut report = serde_json::Map::new();
    for scope in scopes {
        let (input, output) = match &action {
            Some(action) => (
                resolver.lookup_action_in(action, scope)?,
                resolver.lookup_action_out(action, scope)?,
            ),
            None => (
                resolver.lookup_in(class_id, scope)?,
                resolver.lookup_out(class_id, scope)?,
            ),
        };

        if json {
            if input.is_some() || output.is_some() {
                report.insert(
                    scope.to_string(),
                    serde_json::json!({ "in": input.as_deref(), "out": output.as_deref() }),
                );
            }
        } else {
            rows.extend(input_rows(scope, input.as_ref()));
            rows.extend(output_rows(scope, output.as_ref()));
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if rows.is_empty() {
        println!("No bindings found for {}.", class);
    } else {
        println!("{}", Table::new(&rows).with(Style::psql()));
    }
    Ok(())
}

fn input_rows(scope: ScopeType, slots: Option<&Slots<InDescriptor>>) -> Vec<DescriptorRow> {
    let Some(slots) = slots else {
        return Vec::new();
    };
    slots
        .iter()
        .enumerate()
        .filter_map(|(slot, d)| Some((slot, d.as_ref()?)))
        .map(|(slot, d)| DescriptorRow {
            scope,
            direction: "in",
            slot,
            name: d.name.clone(),
            target: d.target.clone().unwrap_or_default(),
            type_name: d.type_ref.to_string(),
            create: d.create.to_string(),
        })
        .collect()
}

fn output_rows(scope: ScopeType, slots: Option<&Slots<OutDescriptor>>) -> Vec<DescriptorRow> {
    let Some(slots) = slots else {
        return Vec::new();
    };
    slots
        .iter()
        .enumerate()
        .filter_map(|(slot, d)| Some((slot, d.as_ref()?)))
        .map(|(slot, d)| DescriptorRow {
            scope,
            direction: "out",
            slot,
            name: d.name.clone(),
            target: d.target.clone().unwrap_or_default(),
            type_name: d.type_ref.to_string(),
            create: String::new(),
        })
        .collect()
}
