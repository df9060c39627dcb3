use alloc::sync::Arc;
use core::any::type_name;
use tracing::{debug, debug_span};

use crate::{any::TypeInfo, dependency_resolver::DependencyResolver, errors::InjectErrorKind, value::Value};

/// Shared instance of a bean.
/// Cacheable beans resolve to the cached instance, prototypes and literals to a fresh one.
pub struct Inject<Dep>(pub Arc<Dep>);

impl<Dep: Send + Sync + 'static> DependencyResolver for Inject<Dep> {
    fn resolve(value: Value) -> Result<Self, InjectErrorKind> {
        let span = debug_span!("inject", dependency = type_name::<Dep>());
        let _guard = span.enter();

        check_type::<Dep>(&value)?;

        let dependency = value.resolve_shared()?;
        match dependency.downcast::<Dep>() {
            Ok(dependency) => {
                debug!("Injected");
                Ok(Self(dependency))
            }
            Err(_) => Err(InjectErrorKind::IncorrectType {
                expected: type_name::<Dep>(),
                actual: value.type_info().name,
            }),
        }
    }
}

/// Instance of a bean owned by the receiver.
/// Default scoped beans are injected as a clone of the cached instance,
/// singletons can't be injected this way.
pub struct InjectTransient<Dep>(pub Dep);

impl<Dep: Clone + Send + Sync + 'static> DependencyResolver for InjectTransient<Dep> {
    fn resolve(value: Value) -> Result<Self, InjectErrorKind> {
        let span = debug_span!("inject_transient", dependency = type_name::<Dep>());
        let _guard = span.enter();

        check_type::<Dep>(&value)?;

        let dependency = value.resolve_owned::<Dep>()?;
        debug!("Injected");
        Ok(Self(dependency))
    }
}

fn check_type<Dep: 'static>(value: &Value) -> Result<(), InjectErrorKind> {
    let actual = value.type_info();
    if actual == TypeInfo::of::<Dep>() {
        return Ok(());
    }

    Err(InjectErrorKind::IncorrectType {
        expected: type_name::<Dep>(),
        actual: actual.name,
    })
}
