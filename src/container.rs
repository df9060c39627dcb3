use alloc::{sync::Arc, vec::Vec};
use core::any::type_name;
use parking_lot::Mutex;
use tracing::{debug, debug_span, info_span};

use crate::{
    any::{BoxAny, RcAny, TypeInfo},
    cache::{Cache, LifecycleState},
    definition::BeanDefinition,
    errors::{BuildErrorKind, FinalizeErrorKind, ResolveErrorKind},
    registry::{Registry, Slot},
    service::Service as _,
    value::{Target, Value, Values},
};

/// Resolves beans of a built [`Registry`] and runs their lifecycle hooks.
///
/// # Notes
/// Cloning is cheap and clones share the cache.
/// Resolution isn't serialized: the cache is only locked while it's read or written,
/// so two threads resolving the same cacheable bean for the first time may both build it.
/// Only the first built instance is cached and finalized.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    registry: Registry,
    cache: Mutex<Cache>,
}

impl Container {
    #[inline]
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            inner: Arc::new(ContainerInner {
                registry,
                cache: Mutex::new(Cache::new()),
            }),
        }
    }

    /// Builds the registry from the definitions and creates a container over it
    ///
    /// # Errors
    /// Returns the first configuration mistake found, no container is created in that case
    #[inline]
    pub fn build(definitions: impl IntoIterator<Item = BeanDefinition>) -> Result<Self, BuildErrorKind> {
        Registry::build(definitions).map(Self::new)
    }

    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Gets a shared instance of the bean
    ///
    /// # Notes
    /// Singleton and default scoped beans are built on the first request and cached,
    /// so repeated calls return the same instance.
    /// Prototype scoped beans are built on every call.
    ///
    /// # Errors
    /// Nothing is cached on error, so a later call builds the bean from scratch
    pub fn get<Dep: Send + Sync + 'static>(&self, id: &str) -> Result<Arc<Dep>, ResolveErrorKind> {
        let span = info_span!("get", id, dependency = type_name::<Dep>());
        let _guard = span.enter();

        let index = self.index_of::<Dep>(id)?;
        let dependency = self.get_shared(index)?;
        dependency.downcast::<Dep>().map_err(|_| ResolveErrorKind::IncorrectType {
            expected: type_name::<Dep>(),
            actual: self.inner.registry.node(index).type_info.name,
        })
    }

    /// Gets an instance of the bean owned by the caller
    ///
    /// # Notes
    /// Default scoped beans are resolved the same way as by [`Container::get`],
    /// so the cached instance is built on the first request and the caller gets a clone of it.
    /// Prototype scoped beans are built on every call and never cached nor finalized.
    ///
    /// # Errors
    /// Singleton scoped beans can't be provided by value, see [`ResolveErrorKind::SingletonByValue`]
    pub fn get_transient<Dep: Clone + Send + Sync + 'static>(&self, id: &str) -> Result<Dep, ResolveErrorKind> {
        let span = info_span!("get_transient", id, dependency = type_name::<Dep>());
        let _guard = span.enter();

        let index = self.index_of::<Dep>(id)?;
        self.get_owned(index)
    }

    /// Lifecycle state of the cached instance of the bean, `None` if it isn't built yet or isn't cacheable
    #[must_use]
    pub fn state(&self, id: &str) -> Option<LifecycleState> {
        let index = self.inner.registry.index_of(id)?;
        self.inner.cache.lock().state(index)
    }

    /// Calls finalize hooks of the cached beans in reverse order of their initialization.
    ///
    /// # Notes
    /// Beans finalized by a previous call are skipped, so the method can be called again
    /// after beans are resolved or after an error.
    ///
    /// # Errors
    /// The first failed hook stops the finalization.
    /// Beans initialized before the failed one stay initialized.
    pub fn finalize(&self) -> Result<(), FinalizeErrorKind> {
        let span = info_span!("finalize");
        let _guard = span.enter();

        loop {
            let next = self.inner.cache.lock().pop_resolved();
            let Some((index, dependency)) = next else {
                break;
            };

            let node = self.inner.registry.node(index);
            if let Some(finalizer) = &node.finalizer {
                finalizer
                    .clone()
                    .call(dependency)
                    .map_err(|source| FinalizeErrorKind::Hook { bean: node.name(), source })?;
            }
            self.inner.cache.lock().mark_finalized(index);
            debug!(bean = %node.name(), "Finalized");
        }

        debug!("Container finalized");
        Ok(())
    }
}

impl Container {
    fn index_of<Dep: 'static>(&self, id: &str) -> Result<usize, ResolveErrorKind> {
        let Some(index) = self.inner.registry.index_of(id) else {
            return Err(ResolveErrorKind::NoBean { id: id.into() });
        };

        let actual = self.inner.registry.node(index).type_info;
        if actual != TypeInfo::of::<Dep>() {
            return Err(ResolveErrorKind::IncorrectType {
                expected: type_name::<Dep>(),
                actual: actual.name,
            });
        }
        Ok(index)
    }

    pub(crate) fn get_shared(&self, index: usize) -> Result<RcAny, ResolveErrorKind> {
        if !self.inner.registry.node(index).scope.is_cached() {
            return self.instantiate(index).map(RcAny::from);
        }

        let cached = self.inner.cache.lock().get(index);
        if let Some(dependency) = cached {
            debug!("Found in cache");
            return Ok(dependency);
        }
        debug!("Not found in cache");

        let dependency = RcAny::from(self.instantiate(index)?);

        let mut guard = self.inner.cache.lock();
        if let Some(dependency) = guard.get(index) {
            debug!("Cached by another resolution");
            return Ok(dependency);
        }
        guard.insert(index, dependency.clone());
        debug!("Cached");

        Ok(dependency)
    }

    pub(crate) fn get_owned<Dep: Clone + Send + Sync + 'static>(&self, index: usize) -> Result<Dep, ResolveErrorKind> {
        let node = self.inner.registry.node(index);
        if !node.scope.is_by_value_allowed() {
            return Err(ResolveErrorKind::SingletonByValue { bean: node.name() });
        }

        let incorrect_type = || ResolveErrorKind::IncorrectType {
            expected: type_name::<Dep>(),
            actual: node.type_info.name,
        };
        if node.scope.is_cached() {
            let dependency = self.get_shared(index)?;
            return dependency.downcast_ref::<Dep>().cloned().ok_or_else(incorrect_type);
        }
        match self.instantiate(index)?.downcast::<Dep>() {
            Ok(dependency) => Ok(*dependency),
            Err(_) => Err(incorrect_type()),
        }
    }

    fn instantiate(&self, index: usize) -> Result<BoxAny, ResolveErrorKind> {
        let node = self.inner.registry.node(index);

        let span = debug_span!("instantiate", bean = %node.name(), scope = node.scope.name());
        let _guard = span.enter();

        let args = node.args.iter().map(|slot| self.value(slot)).collect();
        let mut dependency = node
            .instantiator
            .clone()
            .call(args)
            .map_err(|source| ResolveErrorKind::Instantiator { bean: node.name(), source })?;
        debug!(state = %LifecycleState::Constructed);

        for (name, slots) in &node.properties {
            let values = Values::new(name.clone(), slots.iter().map(|slot| self.value(slot)).collect::<Vec<_>>());
            (node.setter)(dependency.as_mut(), name, values).map_err(|source| ResolveErrorKind::Inject {
                bean: node.name(),
                name: name.clone(),
                source,
            })?;
        }
        if !node.properties.is_empty() {
            debug!(state = %LifecycleState::PropertiesInjected);
        }

        let dependency = node
            .initializer
            .clone()
            .call(dependency)
            .map_err(|source| ResolveErrorKind::Init { bean: node.name(), source })?;
        debug!(state = %LifecycleState::Initialized);

        Ok(dependency)
    }

    fn value(&self, slot: &Slot) -> Value {
        let target = match slot {
            Slot::Bean(index) => Target::Bean(*index),
            Slot::Reference(reference) => Target::Bean(self.inner.registry.reference(*reference)),
            Slot::Literal(literal) => Target::Literal(literal.clone()),
        };
        Value::new(self.clone(), target)
    }
}
