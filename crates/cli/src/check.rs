use scopebind_api::ActionConfig;
use scopebind_core::{ClassRegistry, ScopeDataResolver};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

pub fn run(manifest: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Arc::new(ClassRegistry::load_manifest(manifest)?);
    let resolver = ScopeDataResolver::new(registry.clone());

    let mut failures = 0usize;
    let mut actions = 0usize;
    for class in registry.classes() {
        if let Err(e) = resolver.register_class(class.id) {
            error!("{}: {}", class.name, e);
            println!("FAIL {}: {}", class.name, e);
            failures += 1;
            continue;
        }

        let candidates = class
            .methods
            .iter()
            .filter(|m| !m.parameters.is_empty() && m.setter_property().is_none());
        for method in candidates {
            actions += 1;
            if let Err(e) = resolver.register_action(&ActionConfig::for_method(class.id, method)) {
                error!("{}: {}", method.qualified_name(), e);
                println!("FAIL {}: {}", method.qualified_name(), e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} configuration error(s)", failures).into());
    }

    resolver.freeze();
    info!(
        "manifest {} checked: {} classes, {} action methods",
        manifest.display(),
        registry.len(),
        actions
    );
    println!(
        "OK: {} classes, {} action methods, {} cache entries",
        registry.len(),
        actions,
        resolver.cache().len()
    );
    Ok(())
}
