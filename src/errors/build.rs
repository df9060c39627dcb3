use alloc::string::String;

use crate::definition::{BeanName, Location};

/// Configuration mistakes found while building a registry.
/// A build that fails with any of these produces no container.
#[derive(thiserror::Error, Debug)]
pub enum BuildErrorKind {
    #[error("Bean id `{id}` is already registered")]
    DuplicateId { id: String },
    #[error("Bean {bean} describes an indirection. Register the pointee type instead")]
    IndirectionType { bean: BeanName },
    #[error("Factory of bean {bean} takes {expected} arguments, but {actual} supplied")]
    FactoryArity { bean: BeanName, expected: usize, actual: usize },
    #[error("Factory of bean {bean} provides `{actual}`, expected `{expected}`")]
    FactoryType {
        bean: BeanName,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("The {hook} hook of bean {bean} is declared for `{actual}`")]
    HookType {
        bean: BeanName,
        hook: &'static str,
        actual: &'static str,
    },
    #[error("Prototype bean {bean} can't have a finalizer")]
    PrototypeWithFinalizer { bean: BeanName },
    #[error("Bean `{target}` referenced by {location} of bean {bean} not found")]
    UnresolvedReference {
        bean: BeanName,
        target: String,
        location: Location,
    },
    #[error("Cyclic dependency detected: `{parent}` -> `{child}`")]
    CyclicDependency { parent: String, child: String },
}
