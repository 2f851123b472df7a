use crate::cache::ScopeDataCache;
use crate::config::ResolverConfig;
use crate::error::Result;
use scopebind_api::{
    ActionConfig, ClassId, InDescriptor, MethodId, OutDescriptor, ScopeBundle, ScopeType, Slots,
    Subject, TypeIntrospector,
};
use std::sync::Arc;
use tracing::debug;

/// Lookup facade used by the dispatch pipeline.
///
/// `None` from any lookup means there is nothing to bind for that subject
/// and scope.
pub struct ScopeDataResolver {
    introspector: Arc<dyn TypeIntrospector>,
    cache: ScopeDataCache,
    config: ResolverConfig,
}

impl ScopeDataResolver {
    pub fn new(introspector: Arc<dyn TypeIntrospector>) -> Self {
        Self::with_config(introspector, ResolverConfig::default())
    }

    pub fn with_config(introspector: Arc<dyn TypeIntrospector>, config: ResolverConfig) -> Self {
        Self {
            introspector,
            cache: ScopeDataCache::new(&config),
            config,
        }
    }

    // ---------------------------------------------------------------- bean

    /// Input descriptors of a plain bean class.
    pub fn lookup_in(&self, class: ClassId, scope: ScopeType) -> Result<Option<Slots<InDescriptor>>> {
        Ok(self.lookup(class, None, scope)?.and_then(|b| b.input.clone()))
    }

    /// Output descriptors of a plain bean class.
    pub fn lookup_out(
        &self,
        class: ClassId,
        scope: ScopeType,
    ) -> Result<Option<Slots<OutDescriptor>>> {
        Ok(self.lookup(class, None, scope)?.and_then(|b| b.output.clone()))
    }

    // ---------------------------------------------------------------- action

    /// Input descriptors of an action: class-level ones, then method parameters.
    pub fn lookup_action_in(
        &self,
        action: &ActionConfig,
        scope: ScopeType,
    ) -> Result<Option<Slots<InDescriptor>>> {
        let bundle = self.lookup(action.action_class, self.action_method(action), scope)?;
        Ok(bundle.and_then(|b| b.input.clone()))
    }

    /// Output descriptors of an action: class-level ones, then method parameters.
    pub fn lookup_action_out(
        &self,
        action: &ActionConfig,
        scope: ScopeType,
    ) -> Result<Option<Slots<OutDescriptor>>> {
        let bundle = self.lookup(action.action_class, self.action_method(action), scope)?;
        Ok(bundle.and_then(|b| b.output.clone()))
    }

    // ---------------------------------------------------------------- lifecycle

    /// Inspect an action eagerly so configuration errors surface at registration.
    pub fn register_action(&self, action: &ActionConfig) -> Result<()> {
        self.register_class(action.action_class)?;
        if let Some(method) = self.action_method(action) {
            self.cache
                .scope_data(Subject::Method(method), self.introspector.as_ref())?;
        }
        debug!(
            "registered action {:?}#{:?}",
            action.action_class, action.action_method
        );
        Ok(())
    }

    pub fn register_class(&self, class: ClassId) -> Result<()> {
        self.cache
            .scope_data(Subject::Class(class), self.introspector.as_ref())
            .map(|_| ())
    }

    /// Stop inspecting new subjects; call once registration is complete.
    pub fn freeze(&self) {
        self.cache.freeze();
    }

    pub fn cache(&self) -> &ScopeDataCache {
        &self.cache
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    fn action_method(&self, action: &ActionConfig) -> Option<MethodId> {
        if self.config.skip_argumentless_methods && !action.has_method_arguments {
            return None;
        }
        Some(action.action_method)
    }

    fn lookup(
        &self,
        class: ClassId,
        method: Option<MethodId>,
        scope: ScopeType,
    ) -> Result<Option<Arc<ScopeBundle>>> {
        self.cache
            .lookup(class, method, scope, self.introspector.as_ref())
    }
}
