use core::any::type_name;

use crate::{
    any::BoxAny,
    errors::HookErrorKind,
    service::{service_fn, BoxCloneService},
};

/// Hook called on a bean after its properties are injected
pub trait Initializer<Dep>: Clone + 'static {
    type Error: Into<HookErrorKind>;

    /// # Errors
    /// Hook specific error
    fn init(&mut self, dependency: &mut Dep) -> Result<(), Self::Error>;
}

pub(crate) type BoxedCloneInitializer = BoxCloneService<BoxAny, BoxAny, HookErrorKind>;

#[must_use]
pub(crate) fn boxed_initializer<Dep, Init>(initializer: Init) -> BoxedCloneInitializer
where
    Dep: Send + Sync + 'static,
    Init: Initializer<Dep> + Send + Sync,
{
    BoxCloneService::new(service_fn(move |mut dependency: BoxAny| {
        let Some(typed) = dependency.downcast_mut::<Dep>() else {
            return Err(HookErrorKind::IncorrectType { expected: type_name::<Dep>() });
        };
        initializer.clone().init(typed).map_err(Into::into)?;
        Ok(dependency)
    }))
}

impl<F, Dep, Err> Initializer<Dep> for F
where
    F: FnMut(&mut Dep) -> Result<(), Err> + Clone + 'static,
    Err: Into<HookErrorKind>,
{
    type Error = Err;

    #[inline]
    fn init(&mut self, dependency: &mut Dep) -> Result<(), Self::Error> {
        self(dependency)
    }
}

#[cfg(test)]
mod tests {
    use super::boxed_initializer;
    use crate::{errors::HookErrorKind, service::Service as _};

    use alloc::boxed::Box;

    struct Pool {
        size: u8,
    }

    #[test]
    fn test_boxed_initializer() {
        let mut initializer = boxed_initializer(|pool: &mut Pool| {
            pool.size *= 2;
            Ok::<_, HookErrorKind>(())
        });

        let pool = initializer.call(Box::new(Pool { size: 4 })).unwrap();
        assert_eq!(pool.downcast_ref::<Pool>().unwrap().size, 8);

        let result = initializer.call(Box::new(4u8));
        assert!(matches!(result, Err(HookErrorKind::IncorrectType { .. })));
    }
}
