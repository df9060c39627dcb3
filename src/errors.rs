mod build;
mod dependency_resolver;
mod hook;
mod inject;
mod instantiate;
mod instantiator;

pub use build::BuildErrorKind;
pub use dependency_resolver::ResolveErrorKind;
pub use hook::{FinalizeErrorKind, HookErrorKind};
pub use inject::InjectErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use instantiator::InstantiatorErrorKind;
