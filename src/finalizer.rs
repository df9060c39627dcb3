use alloc::sync::Arc;
use core::any::type_name;

use crate::{
    any::RcAny,
    errors::HookErrorKind,
    service::{service_fn, BoxCloneService},
};

/// Hook called on a cached bean when the container is finalized
pub trait Finalizer<Dep>: Clone + 'static {
    type Error: Into<HookErrorKind>;

    /// # Errors
    /// Hook specific error
    fn finalize(&mut self, dependency: Arc<Dep>) -> Result<(), Self::Error>;
}

pub(crate) type BoxedCloneFinalizer = BoxCloneService<RcAny, (), HookErrorKind>;

#[must_use]
pub(crate) fn boxed_finalizer<Dep, Fin>(finalizer: Fin) -> BoxedCloneFinalizer
where
    Dep: Send + Sync + 'static,
    Fin: Finalizer<Dep> + Send + Sync,
{
    BoxCloneService::new(service_fn(move |dependency: RcAny| {
        let Ok(dependency) = dependency.downcast::<Dep>() else {
            return Err(HookErrorKind::IncorrectType { expected: type_name::<Dep>() });
        };
        finalizer.clone().finalize(dependency).map_err(Into::into)
    }))
}

impl<F, Dep, Err> Finalizer<Dep> for F
where
    F: FnMut(Arc<Dep>) -> Result<(), Err> + Clone + 'static,
    Err: Into<HookErrorKind>,
{
    type Error = Err;

    #[inline]
    fn finalize(&mut self, dependency: Arc<Dep>) -> Result<(), Self::Error> {
        self(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::boxed_finalizer;
    use crate::{errors::HookErrorKind, service::Service as _};

    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicBool, Ordering};

    struct Pool {
        closed: AtomicBool,
    }

    #[test]
    fn test_boxed_finalizer() {
        let mut finalizer = boxed_finalizer(|pool: Arc<Pool>| {
            pool.closed.store(true, Ordering::SeqCst);
            Ok::<_, HookErrorKind>(())
        });

        let pool = Arc::new(Pool {
            closed: AtomicBool::new(false),
        });
        finalizer.call(pool.clone()).unwrap();
        assert!(pool.closed.load(Ordering::SeqCst));

        let result = finalizer.call(Arc::new(1u8));
        assert!(matches!(result, Err(HookErrorKind::IncorrectType { .. })));
    }
}
