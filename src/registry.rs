use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
    vec::Vec,
};
use tracing::debug;

use crate::{
    any::TypeInfo,
    bean::PropertySetter,
    definition::{BeanDefinition, BeanName, Entry, Literal, Location},
    errors::BuildErrorKind,
    finalizer::BoxedCloneFinalizer,
    graph::DependencyGraph,
    initializer::BoxedCloneInitializer,
    instantiator::BoxedCloneInstantiator,
    scope::Scope,
};

#[derive(Clone)]
pub(crate) enum Slot {
    Bean(usize),
    /// Index into the table of bound references
    Reference(usize),
    Literal(Literal),
}

/// Validated definition stored in the registry arena
pub(crate) struct Node {
    pub(crate) id: Option<String>,
    pub(crate) type_info: TypeInfo,
    pub(crate) scope: Scope,
    /// Arena index of the definition this one is nested in
    pub(crate) parent: Option<usize>,
    pub(crate) instantiator: BoxedCloneInstantiator,
    pub(crate) args: Vec<Slot>,
    pub(crate) properties: Vec<(String, Vec<Slot>)>,
    pub(crate) setter: PropertySetter,
    pub(crate) initializer: BoxedCloneInitializer,
    /// `None` for prototypes, which are never finalized
    pub(crate) finalizer: Option<BoxedCloneFinalizer>,
}

impl Node {
    #[inline]
    #[must_use]
    pub(crate) fn name(&self) -> BeanName {
        BeanName {
            id: self.id.clone(),
            type_info: self.type_info,
        }
    }

    fn slots(&self) -> impl Iterator<Item = &Slot> {
        self.args
            .iter()
            .chain(self.properties.iter().flat_map(|(_, slots)| slots.iter()))
    }
}

/// Immutable graph of validated bean definitions.
///
/// Nested definitions are flattened into an arena, each node keeping the index of the definition it's nested in.
/// References are bound once, on build, to the arena index of their target.
pub struct Registry {
    nodes: Vec<Node>,
    ids: BTreeMap<String, usize>,
    references: Vec<usize>,
}

impl Registry {
    /// Registers the definitions with the nested ones, binds references and rejects dependency cycles
    ///
    /// # Errors
    /// Returns the first configuration mistake found
    pub fn build(definitions: impl IntoIterator<Item = BeanDefinition>) -> Result<Self, BuildErrorKind> {
        let mut builder = RegistryBuilder::default();
        for definition in definitions {
            builder.register(definition, None)?;
        }
        debug!(beans = builder.nodes.len(), ids = builder.ids.len(), "Definitions registered");

        let registry = builder.resolve_references()?;
        debug!(references = registry.references.len(), "References resolved");

        registry.check_cycles()?;
        debug!("No dependency cycles found");

        Ok(registry)
    }

    #[inline]
    #[must_use]
    pub(crate) fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    #[inline]
    #[must_use]
    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    #[inline]
    #[must_use]
    pub(crate) fn reference(&self, reference: usize) -> usize {
        self.references[reference]
    }

    /// Arena index of the bean a slot points to, `None` for literals
    #[inline]
    #[must_use]
    pub(crate) fn target(&self, slot: &Slot) -> Option<usize> {
        match slot {
            Slot::Bean(index) => Some(*index),
            Slot::Reference(reference) => Some(self.reference(*reference)),
            Slot::Literal(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of the registered beans in lexicographical order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.keys().map(String::as_str)
    }

    /// Id of the node or of its nearest ancestor that has one
    fn nearest_id(&self, index: usize) -> Option<&str> {
        let mut current = Some(index);
        while let Some(index) = current {
            let node = &self.nodes[index];
            if let Some(id) = &node.id {
                return Some(id.as_str());
            }
            current = node.parent;
        }
        None
    }

    fn check_cycles(&self) -> Result<(), BuildErrorKind> {
        let mut graph = DependencyGraph::new();

        for (index, node) in self.nodes.iter().enumerate() {
            let Some(parent) = self.nearest_id(index) else {
                continue;
            };
            for slot in node.slots() {
                let Some(child) = self.target(slot).and_then(|child| self.nodes[child].id.as_deref()) else {
                    continue;
                };
                if !graph.add_dependency(child, parent) {
                    return Err(BuildErrorKind::CyclicDependency {
                        parent: parent.to_string(),
                        child: child.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

struct PendingReference {
    owner: usize,
    target: String,
    location: Location,
}

#[derive(Default)]
struct RegistryBuilder {
    nodes: Vec<Node>,
    ids: BTreeMap<String, usize>,
    pending: Vec<PendingReference>,
}

impl RegistryBuilder {
    fn register(&mut self, definition: BeanDefinition, parent: Option<usize>) -> Result<usize, BuildErrorKind> {
        validate(&definition)?;

        let index = self.nodes.len();
        if let Some(id) = &definition.id {
            if self.ids.contains_key(id) {
                return Err(BuildErrorKind::DuplicateId { id: id.clone() });
            }
            self.ids.insert(id.clone(), index);
        }

        let BeanDefinition {
            id,
            type_info,
            scope,
            factory,
            args,
            properties,
            setter,
            initializer,
            finalizer,
        } = definition;

        self.nodes.push(Node {
            id,
            type_info,
            scope,
            parent,
            instantiator: factory.instantiator,
            args: Vec::with_capacity(args.len()),
            properties: Vec::with_capacity(properties.len()),
            setter,
            initializer: initializer.hook,
            finalizer: (scope != Scope::Prototype).then_some(finalizer.hook),
        });

        for (position, entry) in args.into_iter().enumerate() {
            let slot = self.register_entry(index, entry, Location::Argument(position))?;
            self.nodes[index].args.push(slot);
        }
        for (name, entries) in properties {
            let mut slots = Vec::with_capacity(entries.len());
            for entry in entries {
                slots.push(self.register_entry(index, entry, Location::Property(name.clone()))?);
            }
            self.nodes[index].properties.push((name, slots));
        }

        Ok(index)
    }

    fn register_entry(&mut self, owner: usize, entry: Entry, location: Location) -> Result<Slot, BuildErrorKind> {
        match entry {
            Entry::Literal(literal) => Ok(Slot::Literal(literal)),
            Entry::Bean(definition) => self.register(definition, Some(owner)).map(Slot::Bean),
            Entry::Reference(target) => {
                self.pending.push(PendingReference { owner, target, location });
                Ok(Slot::Reference(self.pending.len() - 1))
            }
        }
    }

    fn resolve_references(self) -> Result<Registry, BuildErrorKind> {
        let Self { nodes, ids, pending } = self;

        let mut references = Vec::with_capacity(pending.len());
        for PendingReference { owner, target, location } in pending {
            let Some(index) = ids.get(&target) else {
                return Err(BuildErrorKind::UnresolvedReference {
                    bean: nodes[owner].name(),
                    target,
                    location,
                });
            };
            references.push(*index);
        }

        Ok(Registry { nodes, ids, references })
    }
}

fn validate(definition: &BeanDefinition) -> Result<(), BuildErrorKind> {
    let type_info = definition.type_info;

    if type_info.is_indirection() {
        return Err(BuildErrorKind::IndirectionType { bean: definition.name() });
    }
    if definition.factory.provides != type_info {
        return Err(BuildErrorKind::FactoryType {
            bean: definition.name(),
            expected: type_info.name,
            actual: definition.factory.provides.name,
        });
    }
    if definition.factory.arity != definition.args.len() {
        return Err(BuildErrorKind::FactoryArity {
            bean: definition.name(),
            expected: definition.factory.arity,
            actual: definition.args.len(),
        });
    }
    if definition.initializer.explicit && definition.initializer.target != type_info {
        return Err(BuildErrorKind::HookType {
            bean: definition.name(),
            hook: "init",
            actual: definition.initializer.target.name,
        });
    }
    if definition.finalizer.explicit {
        if definition.finalizer.target != type_info {
            return Err(BuildErrorKind::HookType {
                bean: definition.name(),
                hook: "finalize",
                actual: definition.finalizer.target.name,
            });
        }
        if definition.scope == Scope::Prototype {
            return Err(BuildErrorKind::PrototypeWithFinalizer { bean: definition.name() });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{Registry, Slot};
    use crate::{errors::BuildErrorKind, instantiator::instance, Bean, BeanDefinition, Entry, HookErrorKind, InstantiateErrorKind, Location};

    use alloc::{
        format,
        string::{String, ToString as _},
        sync::Arc,
        vec::Vec,
    };
    use tracing_test::traced_test;

    #[derive(Default, Clone)]
    struct Pool;

    impl Bean for Pool {}

    #[derive(Default)]
    struct Repo;

    impl Bean for Repo {}

    #[test]
    #[traced_test]
    fn test_nested_beans_are_flattened() {
        let registry = Registry::build([BeanDefinition::new::<Repo>()
            .id("repo")
            .property("pool", [Entry::bean(BeanDefinition::new::<Pool>().property("inner", [Entry::bean(BeanDefinition::new::<Pool>())]))])])
        .unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.ids().collect::<Vec<_>>(), ["repo"]);
        assert_eq!(registry.node(0).parent, None);
        assert_eq!(registry.node(1).parent, Some(0));
        assert_eq!(registry.node(2).parent, Some(1));
        assert_eq!(registry.nearest_id(2), Some("repo"));
    }

    #[test]
    #[traced_test]
    fn test_reference_bound_to_target() {
        let registry = Registry::build([
            BeanDefinition::new::<Repo>().id("repo").property("pool", [Entry::reference("pool")]),
            BeanDefinition::new::<Pool>().id("pool"),
        ])
        .unwrap();

        let slots = &registry.node(0).properties[0].1;
        assert!(matches!(slots[0], Slot::Reference(_)));
        assert_eq!(registry.target(&slots[0]), registry.index_of("pool"));
    }

    #[test]
    #[traced_test]
    fn test_duplicate_nested_id() {
        let result = Registry::build([
            BeanDefinition::new::<Repo>().id("repo").property("pool", [Entry::bean(BeanDefinition::new::<Pool>().id("pool"))]),
            BeanDefinition::new::<Pool>().id("pool"),
        ]);
        assert!(matches!(result, Err(BuildErrorKind::DuplicateId { id }) if id == "pool"));
    }

    #[test]
    #[traced_test]
    fn test_unresolved_reference_location() {
        let result = Registry::build([BeanDefinition::new::<Repo>()
            .id("repo")
            .property("pools", [Entry::bean(BeanDefinition::new::<Pool>()), Entry::reference("missing")])]);

        let Err(BuildErrorKind::UnresolvedReference { bean, target, location }) = result else {
            panic!("expected unresolved reference");
        };
        assert_eq!(bean.id.as_deref(), Some("repo"));
        assert_eq!(target, "missing");
        assert_eq!(location, Location::Property(String::from("pools")));
    }

    #[test]
    #[traced_test]
    fn test_cycle_through_anonymous_bean() {
        let result = Registry::build([
            BeanDefinition::new::<Repo>()
                .id("a")
                .property("inner", [Entry::bean(BeanDefinition::new::<Repo>().property("b", [Entry::reference("b")]))]),
            BeanDefinition::new::<Repo>().id("b").property("a", [Entry::reference("a")]),
        ]);
        assert!(matches!(result, Err(BuildErrorKind::CyclicDependency { .. })));
    }

    #[test]
    #[traced_test]
    fn test_self_reference() {
        let result = Registry::build([BeanDefinition::new::<Repo>().id("a").property("a", [Entry::reference("a")])]);
        assert!(matches!(
            result,
            Err(BuildErrorKind::CyclicDependency { parent, child }) if parent == "a" && child == "a"
        ));
    }

    #[test]
    #[traced_test]
    fn test_factory_validation() {
        let result = Registry::build([BeanDefinition::from_factory(
            |_: crate::Inject<Pool>| Ok::<_, InstantiateErrorKind>(Repo),
            [],
        )]);
        assert!(matches!(result, Err(BuildErrorKind::FactoryArity { expected: 1, actual: 0, .. })));

        let result = Registry::build([BeanDefinition::new::<Repo>().factory(instance(Pool), [])]);
        assert!(matches!(result, Err(BuildErrorKind::FactoryType { .. })));
    }

    #[test]
    #[traced_test]
    fn test_hook_validation() {
        let result = Registry::build([BeanDefinition::new::<Repo>().init(|_: &mut Pool| Ok::<_, HookErrorKind>(()))]);
        assert!(matches!(result, Err(BuildErrorKind::HookType { hook: "init", .. })));

        let result = Registry::build([BeanDefinition::new::<Repo>()
            .prototype()
            .finalizer(|_: Arc<Repo>| Ok::<_, HookErrorKind>(()))]);
        assert!(matches!(result, Err(BuildErrorKind::PrototypeWithFinalizer { .. })));

        // Default hooks of prototypes are dropped instead of rejected
        let registry = Registry::build([BeanDefinition::new::<Repo>().prototype()]).unwrap();
        assert!(registry.node(0).finalizer.is_none());
    }
}
