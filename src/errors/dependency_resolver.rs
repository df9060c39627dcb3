use alloc::string::String;

use super::{hook::HookErrorKind, inject::InjectErrorKind, instantiate::InstantiateErrorKind, instantiator::InstantiatorErrorKind};
use crate::definition::BeanName;

/// Errors of a single resolution.
/// Nothing is cached when one of these is returned, so the next request for the same bean starts from scratch.
#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Bean `{id}` not found")]
    NoBean { id: String },
    #[error("Incorrect bean type. Actual: {actual}, expected: {expected}")]
    IncorrectType { expected: &'static str, actual: &'static str },
    #[error("Singleton bean {bean} can't be provided by value")]
    SingletonByValue { bean: BeanName },
    #[error("Can't instantiate bean {bean}")]
    Instantiator {
        bean: BeanName,
        #[source]
        source: InstantiatorErrorKind<InjectErrorKind, InstantiateErrorKind>,
    },
    #[error("Can't inject property `{name}` into bean {bean}")]
    Inject {
        bean: BeanName,
        name: String,
        #[source]
        source: InjectErrorKind,
    },
    #[error("Init hook of bean {bean} failed")]
    Init {
        bean: BeanName,
        #[source]
        source: HookErrorKind,
    },
}
