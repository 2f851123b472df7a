use crate::scope::ScopeType;
use crate::types::TypeRef;
use serde::Serialize;
use std::sync::Arc;

/// A binding read from a scope into an action before invocation.
///
/// `target` is set only when `name` is an override; otherwise `name` is the
/// member's own name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InDescriptor {
    pub name: String,
    pub target: Option<String>,
    pub type_ref: TypeRef,
    pub create: bool,
}

impl InDescriptor {
    /// The member this descriptor writes into.
    pub fn property(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.name)
    }
}

/// A binding written back to a scope after invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutDescriptor {
    pub name: String,
    pub target: Option<String>,
    pub type_ref: TypeRef,
}

impl OutDescriptor {
    /// The member this descriptor reads from.
    pub fn property(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered descriptor slots. Class-level slots are dense; method-level slots
/// are indexed by parameter position and may contain holes.
pub type Slots<T> = Arc<[Option<T>]>;

/// Input and output descriptors of one subject at one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeBundle {
    pub input: Option<Slots<InDescriptor>>,
    pub output: Option<Slots<OutDescriptor>>,
}

impl ScopeBundle {
    /// Builds a bundle from slot vectors. A side without any descriptor is
    /// dropped; `None` is returned when both sides are dropped.
    pub fn from_slots(
        input: Vec<Option<InDescriptor>>,
        output: Vec<Option<OutDescriptor>>,
    ) -> Option<Self> {
        let input = into_slots(input);
        let output = into_slots(output);
        if input.is_none() && output.is_none() {
            return None;
        }
        Some(Self { input, output })
    }

    /// Builds a bundle from dense descriptor lists.
    pub fn from_descriptors(input: Vec<InDescriptor>, output: Vec<OutDescriptor>) -> Option<Self> {
        Self::from_slots(
            input.into_iter().map(Some).collect(),
            output.into_iter().map(Some).collect(),
        )
    }

    /// Concatenates two bundles: `first`'s slots followed by `second`'s,
    /// without de-duplication.
    pub fn join(first: &ScopeBundle, second: &ScopeBundle) -> ScopeBundle {
        ScopeBundle {
            input: concat(first.input.as_ref(), second.input.as_ref()),
            output: concat(first.output.as_ref(), second.output.as_ref()),
        }
    }

    pub fn inputs(&self) -> impl Iterator<Item = &InDescriptor> {
        self.input.iter().flat_map(|slots| slots.iter().flatten())
    }

    pub fn outputs(&self) -> impl Iterator<Item = &OutDescriptor> {
        self.output.iter().flat_map(|slots| slots.iter().flatten())
    }
}

fn into_slots<T>(slots: Vec<Option<T>>) -> Option<Slots<T>> {
    if slots.iter().all(Option::is_none) {
        None
    } else {
        Some(Arc::from(slots))
    }
}

fn concat<T: Clone>(first: Option<&Slots<T>>, second: Option<&Slots<T>>) -> Option<Slots<T>> {
    match (first, second) {
        (None, None) => None,
        (Some(slots), None) | (None, Some(slots)) => Some(slots.clone()),
        (Some(a), Some(b)) => Some(a.iter().chain(b.iter()).cloned().collect()),
    }
}

/// Per-scope bundles of one subject, indexed by [`ScopeType::index`].
///
/// A subject without any binding in any scope is the shared empty value,
/// which carries no allocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScopeData(Option<Arc<[Option<Arc<ScopeBundle>>; ScopeType::COUNT]>>);

impl ScopeData {
    pub const EMPTY: ScopeData = ScopeData(None);

    /// Collects one bundle per scope, collapsing to [`ScopeData::EMPTY`]
    /// when no scope produced a bundle.
    pub fn collect<F>(mut inspect: F) -> Self
    where
        F: FnMut(ScopeType) -> Option<ScopeBundle>,
    {
        let slots = ScopeType::ALL.map(|scope| inspect(scope).map(Arc::new));
        if slots.iter().all(Option::is_none) {
            Self::EMPTY
        } else {
            Self(Some(Arc::new(slots)))
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn bundle(&self, scope: ScopeType) -> Option<&Arc<ScopeBundle>> {
        self.0.as_ref()?[scope.index()].as_ref()
    }

    /// Number of scopes with at least one descriptor.
    pub fn populated_scopes(&self) -> usize {
        self.0
            .as_ref()
            .map_or(0, |slots| slots.iter().filter(|s| s.is_some()).count())
    }

    /// True when both values share the same allocation (or are both empty).
    pub fn ptr_eq(&self, other: &ScopeData) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str) -> InDescriptor {
        InDescriptor {
            name: name.to_string(),
            target: None,
            type_ref: TypeRef::new("java.lang.String"),
            create: true,
        }
    }

    fn output(name: &str) -> OutDescriptor {
        OutDescriptor {
            name: name.to_string(),
            target: None,
            type_ref: TypeRef::new("java.lang.String"),
        }
    }

    #[test]
    fn test_bundle_collapses_empty_sides() {
        assert!(ScopeBundle::from_slots(vec![None, None], vec![None]).is_none());

        let bundle = ScopeBundle::from_slots(vec![None, Some(input("a"))], vec![None]).unwrap();
        assert_eq!(bundle.input.as_ref().unwrap().len(), 2);
        assert!(bundle.output.is_none());
    }

    #[test]
    fn test_join_keeps_order_and_duplicates() {
        let class = ScopeBundle::from_descriptors(vec![input("a"), input("b")], vec![]).unwrap();
        let method =
            ScopeBundle::from_slots(vec![None, Some(input("a"))], vec![Some(output("c"))]).unwrap();

        let joined = ScopeBundle::join(&class, &method);
        let names: Vec<_> = joined.inputs().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "a"]);
        assert_eq!(joined.input.as_ref().unwrap().len(), 4);
        assert!(Arc::ptr_eq(
            joined.output.as_ref().unwrap(),
            method.output.as_ref().unwrap()
        ));
    }

    #[test]
    fn test_scope_data_collapses_to_empty() {
        let data = ScopeData::collect(|_| None);
        assert!(data.is_empty());
        assert!(data.ptr_eq(&ScopeData::EMPTY));
        assert!(data.bundle(ScopeType::Request).is_none());

        let data = ScopeData::collect(|scope| {
            (scope == ScopeType::Session)
                .then(|| ScopeBundle::from_descriptors(vec![input("a")], vec![]))
                .flatten()
        });
        assert_eq!(data.populated_scopes(), 1);
        assert!(data.bundle(ScopeType::Session).is_some());
        assert!(data.bundle(ScopeType::Request).is_none());
    }
}
