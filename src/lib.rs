#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod bean;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod definition;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod finalizer;
pub(crate) mod graph;
pub(crate) mod initializer;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod registry;
pub(crate) mod scope;
pub(crate) mod service;
pub(crate) mod value;

pub use any::TypeInfo;
pub use bean::Bean;
pub use cache::LifecycleState;
pub use container::Container;
pub use definition::{BeanDefinition, BeanName, Entry, Literal, Location};
pub use dependency_resolver::{Dependencies, DependencyResolver};
pub use errors::{
    BuildErrorKind, FinalizeErrorKind, HookErrorKind, InjectErrorKind, InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind,
};
pub use finalizer::Finalizer;
pub use graph::DependencyGraph;
pub use initializer::Initializer;
pub use inject::{Inject, InjectTransient};
pub use instantiator::{instance, Instantiator};
pub use registry::Registry;
pub use scope::Scope;
pub use value::{Value, Values};
