use alloc::{boxed::Box, string::String};

use super::dependency_resolver::ResolveErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum InjectErrorKind {
    #[error(transparent)]
    Resolve(Box<ResolveErrorKind>),
    #[error("Incorrect value type. Actual: {actual}, expected: {expected}")]
    IncorrectType { expected: &'static str, actual: &'static str },
    #[error("Expected {expected} values, got {actual}")]
    Count { expected: usize, actual: usize },
    #[error("Unknown property `{name}`")]
    UnknownProperty { name: String },
    #[error("Can't inject argument {index}")]
    Argument {
        index: usize,
        #[source]
        source: Box<InjectErrorKind>,
    },
    #[error("Can't inject element {index}")]
    Element {
        index: usize,
        #[source]
        source: Box<InjectErrorKind>,
    },
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl From<ResolveErrorKind> for InjectErrorKind {
    #[inline]
    fn from(err: ResolveErrorKind) -> Self {
        Self::Resolve(Box::new(err))
    }
}
