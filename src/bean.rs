use alloc::{boxed::Box, string::ToString as _, sync::Arc};
use core::any::{type_name, Any};

use crate::{
    errors::{HookErrorKind, InjectErrorKind},
    finalizer::BoxedCloneFinalizer,
    initializer::BoxedCloneInitializer,
    service::{service_fn, BoxCloneService},
    value::Values,
};

/// Capabilities a type needs to be managed by the container.
///
/// Every method has a default, so an empty `impl Bean for T {}` is enough for beans
/// without properties and lifecycle hooks.
pub trait Bean: Send + Sync + 'static {
    /// Receives the values configured for the property `name`.
    /// Called once per configured property, after construction and before [`Bean::init`].
    ///
    /// # Errors
    /// Returns [`InjectErrorKind::UnknownProperty`] by default
    fn set_property(&mut self, name: &str, _values: Values) -> Result<(), InjectErrorKind> {
        Err(InjectErrorKind::UnknownProperty { name: name.to_string() })
    }

    /// Called once all properties are injected, before the bean is cached or returned
    ///
    /// # Errors
    /// Error aborts the resolution and the bean is dropped
    fn init(&mut self) -> Result<(), HookErrorKind> {
        Ok(())
    }

    /// Called on [`crate::Container::finalize`] for beans that reached the initialized state
    ///
    /// # Errors
    /// Error aborts the finalization of the remaining beans
    fn finalize(&self) -> Result<(), HookErrorKind> {
        Ok(())
    }
}

pub(crate) type PropertySetter = fn(&mut (dyn Any + Send + Sync + 'static), &str, Values) -> Result<(), InjectErrorKind>;

pub(crate) fn set_property<T: Bean>(
    bean: &mut (dyn Any + Send + Sync + 'static),
    name: &str,
    values: Values,
) -> Result<(), InjectErrorKind> {
    match bean.downcast_mut::<T>() {
        Some(bean) => bean.set_property(name, values),
        None => Err(InjectErrorKind::IncorrectType {
            expected: type_name::<T>(),
            actual: "unknown",
        }),
    }
}

#[must_use]
pub(crate) fn boxed_bean_initializer<T: Bean>() -> BoxedCloneInitializer {
    BoxCloneService::new(service_fn(|mut bean: Box<dyn Any + Send + Sync>| {
        let Some(typed) = bean.downcast_mut::<T>() else {
            return Err(HookErrorKind::IncorrectType { expected: type_name::<T>() });
        };
        Bean::init(typed)?;
        Ok(bean)
    }))
}

#[must_use]
pub(crate) fn boxed_bean_finalizer<T: Bean>() -> BoxedCloneFinalizer {
    BoxCloneService::new(service_fn(|bean: Arc<dyn Any + Send + Sync>| match bean.downcast_ref::<T>() {
        Some(typed) => Bean::finalize(typed),
        None => Err(HookErrorKind::IncorrectType { expected: type_name::<T>() }),
    }))
}
