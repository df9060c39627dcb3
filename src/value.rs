use alloc::{boxed::Box, string::String, sync::Arc, vec::Vec};
use core::any::type_name;

use crate::{
    any::{RcAny, TypeInfo},
    container::Container,
    definition::Literal,
    dependency_resolver::DependencyResolver,
    errors::{InjectErrorKind, ResolveErrorKind},
    inject::{Inject, InjectTransient},
};

#[derive(Clone)]
pub(crate) enum Target {
    Bean(usize),
    Literal(Literal),
}

/// Lazy handle to one configured entry.
/// Nothing is built until the handle is resolved.
#[derive(Clone)]
pub struct Value {
    container: Container,
    target: Target,
}

impl Value {
    #[inline]
    #[must_use]
    pub(crate) const fn new(container: Container, target: Target) -> Self {
        Self { container, target }
    }

    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        match &self.target {
            Target::Bean(index) => self.container.registry().node(*index).type_info,
            Target::Literal(literal) => literal.type_info(),
        }
    }

    /// Resolves the entry as a shared instance
    ///
    /// # Errors
    /// Returns an error if the bean behind the handle can't be built
    pub fn resolve_shared(&self) -> Result<RcAny, ResolveErrorKind> {
        match &self.target {
            Target::Bean(index) => self.container.get_shared(*index),
            Target::Literal(literal) => Ok(Arc::from(literal.produce())),
        }
    }

    /// Resolves the entry as an instance owned by the caller.
    /// Default scoped beans are resolved as shared ones and cloned.
    ///
    /// # Errors
    /// Returns an error if the bean behind the handle can't be built, is a singleton or isn't a `Dep`
    pub fn resolve_owned<Dep: Clone + Send + Sync + 'static>(&self) -> Result<Dep, ResolveErrorKind> {
        match &self.target {
            Target::Bean(index) => self.container.get_owned(*index),
            Target::Literal(literal) => match literal.produce().downcast::<Dep>() {
                Ok(dependency) => Ok(*dependency),
                Err(_) => Err(ResolveErrorKind::IncorrectType {
                    expected: type_name::<Dep>(),
                    actual: literal.type_info().name,
                }),
            },
        }
    }
}

/// Ordered values configured for one property
pub struct Values {
    name: String,
    values: Vec<Value>,
}

impl Values {
    #[inline]
    #[must_use]
    pub(crate) const fn new(name: String, values: Vec<Value>) -> Self {
        Self { name, values }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<Value> {
        self.values
    }

    /// Resolves the only configured value
    ///
    /// # Errors
    /// Returns [`InjectErrorKind::Count`] if the property doesn't hold exactly one value
    pub fn single<Dep: DependencyResolver>(self) -> Result<Dep, InjectErrorKind> {
        let actual = self.values.len();
        let mut values = self.values.into_iter();
        match (values.next(), values.next()) {
            (Some(value), None) => Dep::resolve(value),
            _ => Err(InjectErrorKind::Count { expected: 1, actual }),
        }
    }

    /// Resolves every configured value in declaration order
    ///
    /// # Errors
    /// Returns [`InjectErrorKind::Element`] with the position of the first value that can't be resolved
    pub fn list<Dep: DependencyResolver>(self) -> Result<Vec<Dep>, InjectErrorKind> {
        self.values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                Dep::resolve(value).map_err(|err| InjectErrorKind::Element {
                    index,
                    source: Box::new(err),
                })
            })
            .collect()
    }

    /// Shortcut for [`Self::single`] with [`InjectTransient`]
    ///
    /// # Errors
    /// See [`Self::single`]
    #[inline]
    pub fn value<T: Clone + Send + Sync + 'static>(self) -> Result<T, InjectErrorKind> {
        self.single::<InjectTransient<T>>().map(|InjectTransient(value)| value)
    }

    /// Shortcut for [`Self::single`] with [`Inject`]
    ///
    /// # Errors
    /// See [`Self::single`]
    #[inline]
    pub fn shared<T: Send + Sync + 'static>(self) -> Result<Arc<T>, InjectErrorKind> {
        self.single::<Inject<T>>().map(|Inject(value)| value)
    }
}
