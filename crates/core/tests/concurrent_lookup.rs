//! Racing first lookups publish exactly one array per subject.

use scopebind_api::{ActionConfig, Binding, ScopeType, Subject};
use scopebind_core::ScopeDataResolver;
use scopebind_core::registry::{ClassRegistry, ClassSpec, MethodSpec, ParameterSpec};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;

#[test]
fn test_racing_lookups_agree() {
    let mut builder = ClassRegistry::builder();
    for i in 0..16 {
        builder.add_class(
            ClassSpec::new(format!("com.acme.Action{i}"))
                .field("name", "java.lang.String", [Binding::in_out(ScopeType::Request)])
                .method(
                    MethodSpec::new("execute").param(
                        ParameterSpec::new("long")
                            .named("id")
                            .binding(Binding::input(ScopeType::Request)),
                    ),
                ),
        );
    }
    let registry = Arc::new(builder.build().unwrap());
    let resolver = Arc::new(ScopeDataResolver::new(registry.clone()));

    let actions: Vec<ActionConfig> = registry
        .classes()
        .map(|class| ActionConfig::for_method(class.id, class.find_method("execute").unwrap()))
        .collect();
    let actions = Arc::new(actions);
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let resolver = resolver.clone();
            let actions = actions.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                actions
                    .iter()
                    .map(|action| {
                        resolver
                            .lookup_action_in(action, ScopeType::Request)
                            .unwrap()
                            .unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }

    assert_eq!(resolver.cache().len(), actions.len() * 2);
    for action in actions.iter() {
        let class = resolver
            .cache()
            .scope_data(Subject::Class(action.action_class), registry.as_ref())
            .unwrap();
        let again = resolver
            .cache()
            .scope_data(Subject::Class(action.action_class), registry.as_ref())
            .unwrap();
        assert!(class.ptr_eq(&again));
    }
}
