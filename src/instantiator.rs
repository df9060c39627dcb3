use alloc::{boxed::Box, vec::Vec};

use crate::{
    any::BoxAny,
    dependency_resolver::{Dependencies, DependencyResolver},
    errors::{InjectErrorKind, InstantiateErrorKind, InstantiatorErrorKind},
    service::{service_fn, BoxCloneService},
    value::Value,
};

/// Factory of a bean.
/// Implemented for closures that take up to 12 [`DependencyResolver`] parameters and return a `Result`.
pub trait Instantiator<Deps>: Clone + 'static
where
    Deps: Dependencies,
{
    type Provides: 'static;
    type Error: Into<InstantiateErrorKind>;

    /// # Errors
    /// Factory specific error
    fn instantiate(&mut self, dependencies: Deps) -> Result<Self::Provides, Self::Error>;
}

pub(crate) type BoxedCloneInstantiator = BoxCloneService<Vec<Value>, BoxAny, InstantiatorErrorKind<InjectErrorKind, InstantiateErrorKind>>;

#[must_use]
pub(crate) fn boxed_instantiator<Inst, Deps>(instantiator: Inst) -> BoxedCloneInstantiator
where
    Inst: Instantiator<Deps> + Send + Sync,
    Inst::Provides: Send + Sync,
    Deps: Dependencies,
{
    BoxCloneService::new(service_fn(move |values: Vec<Value>| {
        let dependencies = match Deps::resolve(values) {
            Ok(dependencies) => dependencies,
            Err(err) => return Err(InstantiatorErrorKind::Deps(err)),
        };
        let dependency = match instantiator.clone().instantiate(dependencies) {
            Ok(dependency) => dependency,
            Err(err) => return Err(InstantiatorErrorKind::Factory(err.into())),
        };

        Ok(Box::new(dependency) as BoxAny)
    }))
}

/// Factory that provides clones of a pre-built value
#[inline]
#[must_use]
pub const fn instance<T: Clone + Send + Sync + 'static>(val: T) -> impl Instantiator<(), Provides = T, Error = InstantiateErrorKind> + Send + Sync {
    move || Ok(val.clone())
}

macro_rules! impl_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Instantiator<($($ty,)*)> for F
        where
            F: FnMut($($ty,)*) -> Result<Response, Err> + Clone + 'static,
            Response: 'static,
            Err: Into<InstantiateErrorKind>,
            $( $ty: DependencyResolver, )*
        {
            type Provides = Response;
            type Error = Err;

            #[inline]
            fn instantiate(&mut self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Provides, Self::Error> {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_instantiator);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_instantiator, InstantiateErrorKind, Instantiator};
    use crate::{dependency_resolver::Dependencies, errors::InstantiatorErrorKind, service::Service as _, InjectTransient, Value};

    use alloc::{
        format,
        string::{String, ToString as _},
        sync::Arc,
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing::debug;
    use tracing_test::traced_test;

    struct Response(u8);

    #[test]
    #[allow(dead_code)]
    fn test_factory_helper() {
        fn resolver<Deps: Dependencies, F: Instantiator<Deps>>(_f: F) {}
        fn resolver_with_deps() {
            resolver(|| Ok::<_, InstantiateErrorKind>(()));
            resolver(|_: Value| Ok::<_, InstantiateErrorKind>(()));
            resolver(|InjectTransient(_): InjectTransient<u8>, _: Value| Ok::<_, InstantiateErrorKind>(()));
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator() {
        let call_count = Arc::new(AtomicU8::new(0));

        let mut instantiator = boxed_instantiator({
            let call_count = call_count.clone();
            move || {
                call_count.fetch_add(1, Ordering::SeqCst);

                debug!("Call instantiator");
                Ok::<_, InstantiateErrorKind>(Response(call_count.load(Ordering::SeqCst)))
            }
        });

        let response = instantiator.call(alloc::vec![]).unwrap();
        assert_eq!(response.downcast_ref::<Response>().unwrap().0, 1);

        let response = instantiator.clone().call(alloc::vec![]).unwrap();
        assert_eq!(response.downcast_ref::<Response>().unwrap().0, 2);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[traced_test]
    fn test_factory_error() {
        let mut instantiator = boxed_instantiator(|| Err::<Response, _>(InstantiateErrorKind::from(anyhow::anyhow!("pool is closed"))));

        let result = instantiator.call(alloc::vec![]);
        assert!(matches!(result, Err(InstantiatorErrorKind::Factory(_))));
    }
}
