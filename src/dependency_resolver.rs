use alloc::{boxed::Box, vec::Vec};

use crate::{errors::InjectErrorKind, value::Value};

/// Converts a configured entry into a factory parameter or property value
pub trait DependencyResolver: Sized {
    /// # Errors
    /// Returns an error if the entry can't be resolved or has an unexpected type
    fn resolve(value: Value) -> Result<Self, InjectErrorKind>;
}

impl DependencyResolver for Value {
    #[inline]
    fn resolve(value: Value) -> Result<Self, InjectErrorKind> {
        Ok(value)
    }
}

/// Positional parameters of a factory
pub trait Dependencies: Sized {
    /// Number of parameters the factory takes
    fn count() -> usize;

    /// # Errors
    /// Returns [`InjectErrorKind::Count`] if the number of values doesn't match,
    /// or [`InjectErrorKind::Argument`] with the position of the first parameter that can't be resolved
    fn resolve(values: Vec<Value>) -> Result<Self, InjectErrorKind>;
}

macro_rules! impl_dependencies {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<$($ty,)*> Dependencies for ($($ty,)*)
        where
            $( $ty: DependencyResolver, )*
        {
            #[inline]
            fn count() -> usize {
                let names: &[&str] = &[$(stringify!($ty)),*];
                names.len()
            }

            fn resolve(values: Vec<Value>) -> Result<Self, InjectErrorKind> {
                let expected = Self::count();
                let actual = values.len();
                if actual != expected {
                    return Err(InjectErrorKind::Count { expected, actual });
                }

                let mut values = values.into_iter().enumerate();
                $(
                    let Some((index, value)) = values.next() else {
                        return Err(InjectErrorKind::Count { expected, actual });
                    };
                    let $ty = <$ty as DependencyResolver>::resolve(value).map_err(|err| InjectErrorKind::Argument {
                        index,
                        source: Box::new(err),
                    })?;
                )*

                Ok(($($ty,)*))
            }
        }
    };
}

all_the_tuples!(impl_dependencies);
