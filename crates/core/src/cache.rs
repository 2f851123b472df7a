//! Memoized scope data per class and per method.
//!
//! Entries are computed on first lookup and kept for the life of the cache.
//! Racing first lookups may inspect the same subject twice; the first
//! published result wins and every caller returns that one.

use crate::config::ResolverConfig;
use crate::error::{Result, ScopeDataError};
use crate::inspect::inspect_subject;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use scopebind_api::{
    ClassId, MethodId, ScopeBundle, ScopeData, ScopeType, Subject, TypeIntrospector,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, trace};

#[derive(Debug)]
pub struct ScopeDataCache {
    entries: DashMap<Subject, ScopeData>,
    frozen: AtomicBool,
}

impl Default for ScopeDataCache {
    fn default() -> Self {
        Self::new(&ResolverConfig::default())
    }
}

impl ScopeDataCache {
    pub fn new(config: &ResolverConfig) -> Self {
        Self {
            entries: DashMap::with_capacity_and_shard_amount(
                config.initial_capacity,
                config.effective_shards(),
            ),
            frozen: AtomicBool::new(false),
        }
    }

    /// Cached scope data for `subject`, inspecting it on first use.
    pub fn scope_data(
        &self,
        subject: Subject,
        introspector: &dyn TypeIntrospector,
    ) -> Result<ScopeData> {
        if let Some(entry) = self.entries.get(&subject) {
            trace!("scope data cache hit: {}", subject);
            return Ok(entry.value().clone());
        }

        if self.is_frozen() {
            return Err(ScopeDataError::InvalidSubject(format!(
                "{} was not registered before the cache was frozen",
                subject
            )));
        }

        // Inspect without holding a shard lock.
        let computed = inspect_subject(subject, introspector)?;

        let published = match self.entries.entry(subject) {
            Entry::Occupied(entry) => {
                debug!("discarding duplicate inspection of {}", subject);
                entry.get().clone()
            }
            Entry::Vacant(entry) => entry.insert(computed).value().clone(),
        };
        Ok(published)
    }

    /// Bundle for `scope`, joining class-level and method-level data.
    ///
    /// Class descriptors come first, method descriptors are appended. When
    /// only one side has data its cached bundle is returned as is; joins are
    /// built per call and not cached.
    pub fn lookup(
        &self,
        class: ClassId,
        method: Option<MethodId>,
        scope: ScopeType,
        introspector: &dyn TypeIntrospector,
    ) -> Result<Option<Arc<ScopeBundle>>> {
        let class_data = self.scope_data(Subject::Class(class), introspector)?;
        let method_data = match method {
            Some(method) => self.scope_data(Subject::Method(method), introspector)?,
            None => ScopeData::EMPTY,
        };

        Ok(select(&class_data, &method_data, scope))
    }

    /// Reject misses from now on; cached entries stay readable.
    pub fn freeze(&self) {
        if !self.frozen.swap(true, Ordering::AcqRel) {
            info!("scope data cache frozen with {} entries", self.entries.len());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }

    pub fn contains(&self, subject: Subject) -> bool {
        self.entries.contains_key(&subject)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn select(class: &ScopeData, method: &ScopeData, scope: ScopeType) -> Option<Arc<ScopeBundle>> {
    match (class.is_empty(), method.is_empty()) {
        (true, true) => None,
        (false, true) => class.bundle(scope).cloned(),
        (true, false) => method.bundle(scope).cloned(),
        (false, false) => match (class.bundle(scope), method.bundle(scope)) {
            (Some(c), Some(m)) => Some(Arc::new(ScopeBundle::join(c, m))),
            (c, m) => c.or(m).cloned(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ClassRegistry, ClassSpec, MethodSpec, ParameterSpec};
    use scopebind_api::Binding;

    fn registry() -> ClassRegistry {
        ClassRegistry::builder()
            .class(
                ClassSpec::new("com.acme.WidgetAction")
                    .field("name", "java.lang.String", [Binding::input(ScopeType::Request)])
                    .method(
                        MethodSpec::new("save").param(
                            ParameterSpec::new("long")
                                .named("id")
                                .binding(Binding::input(ScopeType::Request)),
                        ),
                    )
                    .method(
                        MethodSpec::new("audit").param(
                            ParameterSpec::new("java.lang.String")
                                .binding(Binding::output(ScopeType::Session)),
                        ),
                    ),
            )
            .class(ClassSpec::new("com.acme.Plain"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_entries_are_computed_once() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let class = registry.class_id("com.acme.WidgetAction").unwrap();

        let first = cache.scope_data(Subject::Class(class), &registry).unwrap();
        let second = cache.scope_data(Subject::Class(class), &registry).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_single_side_returns_cached_bundle() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let class = registry.class_id("com.acme.WidgetAction").unwrap();

        let a = cache.lookup(class, None, ScopeType::Request, &registry).unwrap().unwrap();
        let b = cache.lookup(class, None, ScopeType::Request, &registry).unwrap().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_join_appends_method_descriptors() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let class = registry.class_id("com.acme.WidgetAction").unwrap();
        let save = registry.find_method(class, "save").unwrap().id;

        let bundle = cache
            .lookup(class, Some(save), ScopeType::Request, &registry)
            .unwrap()
            .unwrap();
        let names: Vec<_> = bundle.inputs().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["name", "id"]);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_method_only_scope() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let class = registry.class_id("com.acme.WidgetAction").unwrap();
        let audit = registry.find_method(class, "audit").unwrap().id;

        let bundle = cache
            .lookup(class, Some(audit), ScopeType::Session, &registry)
            .unwrap()
            .unwrap();
        assert_eq!(bundle.outputs().next().unwrap().name, "string");
        assert!(bundle.input.is_none());
    }

    #[test]
    fn test_empty_class_yields_none() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let plain = registry.class_id("com.acme.Plain").unwrap();

        for scope in ScopeType::ALL {
            assert!(cache.lookup(plain, None, scope, &registry).unwrap().is_none());
        }
        assert!(
            cache
                .scope_data(Subject::Class(plain), &registry)
                .unwrap()
                .ptr_eq(&ScopeData::EMPTY)
        );
    }

    #[test]
    fn test_unknown_subject_fails_fast() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let err = cache
            .scope_data(Subject::Method(MethodId(99)), &registry)
            .unwrap_err();
        assert!(matches!(err, ScopeDataError::InvalidSubject(_)));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_frozen_cache_rejects_misses() {
        let registry = registry();
        let cache = ScopeDataCache::default();
        let class = registry.class_id("com.acme.WidgetAction").unwrap();
        let plain = registry.class_id("com.acme.Plain").unwrap();

        cache.scope_data(Subject::Class(class), &registry).unwrap();
        cache.freeze();

        assert!(cache.scope_data(Subject::Class(class), &registry).is_ok());
        let err = cache.scope_data(Subject::Class(plain), &registry).unwrap_err();
        assert!(err.to_string().contains("frozen"));
    }
}
