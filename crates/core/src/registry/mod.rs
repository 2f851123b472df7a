//! In-memory type introspector built from declarative class specs.

pub mod manifest;

pub use manifest::{ClassSpec, FieldSpec, Manifest, MethodSpec, ParameterSpec};

use crate::error::{Result, ScopeDataError};
use lasso::{Rodeo, RodeoReader, Spur};
use scopebind_api::{
    ClassDescriptor, ClassId, FieldDescriptor, MethodDescriptor, MethodId, ParameterDescriptor,
    TypeIntrospector,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Read-only registry of classes with inheritance already flattened.
#[derive(Debug)]
pub struct ClassRegistry {
    names: RodeoReader,
    ids: HashMap<Spur, ClassId>,
    classes: Vec<Arc<ClassDescriptor>>,
    methods: Vec<Arc<MethodDescriptor>>,
}

impl ClassRegistry {
    pub fn builder() -> ClassRegistryBuilder {
        ClassRegistryBuilder::new()
    }

    pub fn from_manifest(manifest: Manifest) -> Result<Self> {
        ClassRegistryBuilder {
            specs: manifest.classes,
        }
        .build()
    }

    /// Load a JSON manifest from disk.
    pub fn load_manifest(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = serde_json::from_str(&content)?;
        tracing::debug!(
            "loaded manifest {} with {} classes",
            path.display(),
            manifest.classes.len()
        );
        Self::from_manifest(manifest)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        let key = self.names.get(name.trim())?;
        self.ids.get(&key).copied()
    }

    pub fn class(&self, id: ClassId) -> Option<&Arc<ClassDescriptor>> {
        self.classes.get(id.0 as usize)
    }

    pub fn class_by_name(&self, name: &str) -> Option<&Arc<ClassDescriptor>> {
        self.class_id(name).and_then(|id| self.class(id))
    }

    pub fn method(&self, id: MethodId) -> Option<&Arc<MethodDescriptor>> {
        self.methods.get(id.0 as usize)
    }

    /// First method named `name` visible on the class, inherited ones included.
    pub fn find_method(&self, class: ClassId, name: &str) -> Option<&Arc<MethodDescriptor>> {
        self.class(class)?.find_method(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &Arc<ClassDescriptor>> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl TypeIntrospector for ClassRegistry {
    fn describe_class(&self, id: ClassId) -> Option<Arc<ClassDescriptor>> {
        self.class(id).cloned()
    }

    fn describe_method(&self, id: MethodId) -> Option<Arc<MethodDescriptor>> {
        self.method(id).cloned()
    }
}

#[derive(Debug, Default)]
pub struct ClassRegistryBuilder {
    specs: Vec<ClassSpec>,
}

impl ClassRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(mut self, spec: ClassSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn add_class(&mut self, spec: ClassSpec) -> &mut Self {
        self.specs.push(spec);
        self
    }

    /// Assign identifiers, link superclasses and flatten members.
    pub fn build(self) -> Result<ClassRegistry> {
        let specs = self.specs;

        let mut names = Rodeo::default();
        let mut ids = HashMap::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let key = names.get_or_intern(spec.name.trim());
            if ids.insert(key, ClassId(index as u32)).is_some() {
                return Err(ScopeDataError::Manifest(format!(
                    "duplicate class: {}",
                    spec.name
                )));
            }
        }

        let mut methods = Vec::new();
        let declared: Vec<DeclaredMembers> = specs
            .iter()
            .map(|spec| declare_members(spec, &mut methods))
            .collect();

        let parents = specs
            .iter()
            .map(|spec| {
                let Some(superclass) = spec.extends.as_deref().map(str::trim) else {
                    return Ok(None);
                };
                if superclass.is_empty() {
                    return Ok(None);
                }
                names
                    .get(superclass)
                    .and_then(|key| ids.get(&key))
                    .map(|id| Some(id.0 as usize))
                    .ok_or_else(|| {
                        ScopeDataError::Manifest(format!(
                            "{} extends unknown class {}",
                            spec.name, superclass
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let classes = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let chain = ancestry(index, &parents, &specs)?;
                let (fields, methods) = flatten(&chain, &declared);
                Ok(Arc::new(ClassDescriptor {
                    id: ClassId(index as u32),
                    name: spec.name.trim().to_string(),
                    fields,
                    methods,
                }))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "built class registry: {} classes, {} methods",
            classes.len(),
            methods.len()
        );

        Ok(ClassRegistry {
            names: names.into_reader(),
            ids,
            classes,
            methods,
        })
    }
}

struct DeclaredMembers {
    fields: Vec<Arc<FieldDescriptor>>,
    methods: Vec<Arc<MethodDescriptor>>,
}

fn declare_members(spec: &ClassSpec, arena: &mut Vec<Arc<MethodDescriptor>>) -> DeclaredMembers {
    let declaring_class = spec.name.trim();

    let fields = spec
        .fields
        .iter()
        .map(|field| {
            Arc::new(FieldDescriptor {
                name: field.name.clone(),
                declaring_class: declaring_class.to_string(),
                type_ref: field.type_ref.clone(),
                bindings: field.bindings.clone(),
            })
        })
        .collect();

    let methods = spec
        .methods
        .iter()
        .map(|method| {
            let descriptor = Arc::new(MethodDescriptor {
                id: MethodId(arena.len() as u32),
                name: method.name.clone(),
                declaring_class: declaring_class.to_string(),
                parameters: method
                    .parameters
                    .iter()
                    .map(|p| ParameterDescriptor {
                        name: p.name.clone(),
                        type_ref: p.type_ref.clone(),
                        bindings: p.bindings.clone(),
                    })
                    .collect(),
                return_type: method.return_type.clone(),
                bindings: method.bindings.clone(),
            });
            arena.push(descriptor.clone());
            descriptor
        })
        .collect();

    DeclaredMembers { fields, methods }
}

/// Class indices from the root ancestor down to `index`.
fn ancestry(index: usize, parents: &[Option<usize>], specs: &[ClassSpec]) -> Result<Vec<usize>> {
    let mut chain = vec![index];
    let mut current = index;
    while let Some(parent) = parents[current] {
        if chain.len() > parents.len() {
            return Err(ScopeDataError::Manifest(format!(
                "inheritance cycle through {}",
                specs[index].name
            )));
        }
        chain.push(parent);
        current = parent;
    }
    chain.reverse();
    Ok(chain)
}

/// Ancestor members first. A method with the same signature as an inherited
/// one takes the inherited slot; fields are never hidden.
fn flatten(
    chain: &[usize],
    declared: &[DeclaredMembers],
) -> (Vec<Arc<FieldDescriptor>>, Vec<Arc<MethodDescriptor>>) {
    let mut fields = Vec::new();
    let mut methods: Vec<Arc<MethodDescriptor>> = Vec::new();

    for &class in chain {
        let members = &declared[class];
        fields.extend(members.fields.iter().cloned());
        for method in &members.methods {
            let signature = method.signature();
            match methods.iter().position(|m| m.signature() == signature) {
                Some(slot) => methods[slot] = method.clone(),
                None => methods.push(method.clone()),
            }
        }
    }

    (fields, methods)
}
