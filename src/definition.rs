use alloc::{boxed::Box, collections::BTreeMap, string::String, sync::Arc, vec::Vec};
use core::fmt::{self, Display, Formatter};

use crate::{
    any::{BoxAny, TypeInfo},
    bean::{boxed_bean_finalizer, boxed_bean_initializer, set_property, Bean, PropertySetter},
    dependency_resolver::Dependencies,
    finalizer::{boxed_finalizer, BoxedCloneFinalizer, Finalizer},
    initializer::{boxed_initializer, BoxedCloneInitializer, Initializer},
    instantiator::{boxed_instantiator, BoxedCloneInstantiator, Instantiator},
    scope::Scope,
    InstantiateErrorKind,
};

/// Human readable identity of a bean used in errors and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanName {
    pub id: Option<String>,
    pub type_info: TypeInfo,
}

impl Display for BeanName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "`{id}` ({})", self.type_info.short_name()),
            None => write!(f, "<anonymous> ({})", self.type_info.short_name()),
        }
    }
}

/// Where an entry sits inside its owning definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Argument(usize),
    Property(String),
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Location::Argument(index) => write!(f, "factory argument {index}"),
            Location::Property(name) => write!(f, "property `{name}`"),
        }
    }
}

/// A value known at definition time.
/// Every resolution yields a new clone of it.
#[derive(Clone)]
pub struct Literal {
    pub(crate) type_info: TypeInfo,
    produce: Arc<dyn Fn() -> BoxAny + Send + Sync>,
}

impl Literal {
    #[must_use]
    pub fn new<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            produce: Arc::new(move || Box::new(value.clone()) as BoxAny),
        }
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    pub(crate) fn produce(&self) -> BoxAny {
        (self.produce)()
    }
}

/// One value slot of a property or factory argument
pub enum Entry {
    Literal(Literal),
    Bean(BeanDefinition),
    Reference(String),
}

impl Entry {
    #[inline]
    #[must_use]
    pub fn literal<T: Clone + Send + Sync + 'static>(value: T) -> Self {
        Self::Literal(Literal::new(value))
    }

    #[inline]
    #[must_use]
    pub fn bean(definition: BeanDefinition) -> Self {
        Self::Bean(definition)
    }

    /// Placeholder for the bean with the given id, bound once while the registry is built
    #[inline]
    #[must_use]
    pub fn reference(id: impl Into<String>) -> Self {
        Self::Reference(id.into())
    }
}

impl From<BeanDefinition> for Entry {
    #[inline]
    fn from(definition: BeanDefinition) -> Self {
        Self::Bean(definition)
    }
}

impl From<Literal> for Entry {
    #[inline]
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

pub(crate) struct FactoryData {
    pub(crate) instantiator: BoxedCloneInstantiator,
    pub(crate) arity: usize,
    pub(crate) provides: TypeInfo,
}

impl FactoryData {
    fn new<Inst, Deps>(instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps> + Send + Sync,
        Inst::Provides: Send + Sync,
        Deps: Dependencies,
    {
        Self {
            instantiator: boxed_instantiator(instantiator),
            arity: Deps::count(),
            provides: TypeInfo::of::<Inst::Provides>(),
        }
    }
}

pub(crate) struct HookData<Hook> {
    pub(crate) hook: Hook,
    pub(crate) target: TypeInfo,
    pub(crate) explicit: bool,
}

/// Blueprint of one bean.
///
/// # Examples
/// ```rust
/// use beanstalk::{Bean, BeanDefinition, Container, Entry, InjectErrorKind, InjectTransient, Values};
///
/// #[derive(Default)]
/// struct Port(u16);
///
/// impl Bean for Port {
///     fn set_property(&mut self, name: &str, values: Values) -> Result<(), InjectErrorKind> {
///         match name {
///             "value" => {
///                 let InjectTransient(value) = values.single()?;
///                 self.0 = value;
///                 Ok(())
///             }
///             _ => Err(InjectErrorKind::UnknownProperty { name: name.into() }),
///         }
///     }
/// }
///
/// let container = Container::build([BeanDefinition::new::<Port>().id("port").property("value", [Entry::literal(8080u16)])]).unwrap();
/// assert_eq!(container.get::<Port>("port").unwrap().0, 8080);
/// ```
pub struct BeanDefinition {
    pub(crate) id: Option<String>,
    pub(crate) type_info: TypeInfo,
    pub(crate) scope: Scope,
    pub(crate) factory: FactoryData,
    pub(crate) args: Vec<Entry>,
    pub(crate) properties: BTreeMap<String, Vec<Entry>>,
    pub(crate) setter: PropertySetter,
    pub(crate) initializer: HookData<BoxedCloneInitializer>,
    pub(crate) finalizer: HookData<BoxedCloneFinalizer>,
}

impl BeanDefinition {
    /// Creates a definition built with [`Default::default`]
    #[inline]
    #[must_use]
    pub fn new<T: Bean + Default>() -> Self {
        Self::from_factory(|| Ok::<_, InstantiateErrorKind>(T::default()), [])
    }

    /// Creates a definition built by the factory.
    /// Each argument entry is resolved and converted into the matching factory parameter.
    #[must_use]
    pub fn from_factory<Inst, Deps>(instantiator: Inst, args: impl IntoIterator<Item = Entry>) -> Self
    where
        Inst: Instantiator<Deps> + Send + Sync,
        Inst::Provides: Bean,
        Deps: Dependencies,
    {
        let type_info = TypeInfo::of::<Inst::Provides>();
        Self {
            id: None,
            type_info,
            scope: Scope::default(),
            factory: FactoryData::new(instantiator),
            args: args.into_iter().collect(),
            properties: BTreeMap::new(),
            setter: set_property::<Inst::Provides>,
            initializer: HookData {
                hook: boxed_bean_initializer::<Inst::Provides>(),
                target: type_info,
                explicit: false,
            },
            finalizer: HookData {
                hook: boxed_bean_finalizer::<Inst::Provides>(),
                target: type_info,
                explicit: false,
            },
        }
    }

    /// Replaces the factory.
    /// The factory must provide the type the definition was created for, which is checked on build.
    #[inline]
    #[must_use]
    pub fn factory<Inst, Deps>(mut self, instantiator: Inst, args: impl IntoIterator<Item = Entry>) -> Self
    where
        Inst: Instantiator<Deps> + Send + Sync,
        Inst::Provides: Send + Sync,
        Deps: Dependencies,
    {
        self.factory = FactoryData::new(instantiator);
        self.args = args.into_iter().collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    #[inline]
    #[must_use]
    pub fn singleton(self) -> Self {
        self.scope(Scope::Singleton)
    }

    #[inline]
    #[must_use]
    pub fn prototype(self) -> Self {
        self.scope(Scope::Prototype)
    }

    /// Sets the entries of a property, replacing the ones set before under the same name.
    /// Order of entries is kept and drives sequence properties.
    #[inline]
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, entries: impl IntoIterator<Item = Entry>) -> Self {
        self.properties.insert(name.into(), entries.into_iter().collect());
        self
    }

    /// Overrides [`Bean::init`] with an explicit hook
    #[inline]
    #[must_use]
    pub fn init<Dep, Init>(mut self, initializer: Init) -> Self
    where
        Dep: Send + Sync + 'static,
        Init: Initializer<Dep> + Send + Sync,
    {
        self.initializer = HookData {
            hook: boxed_initializer(initializer),
            target: TypeInfo::of::<Dep>(),
            explicit: true,
        };
        self
    }

    /// Overrides [`Bean::finalize`] with an explicit hook.
    /// Prototype beans can't have one, because the container doesn't track them after they are returned.
    #[inline]
    #[must_use]
    pub fn finalizer<Dep, Fin>(mut self, finalizer: Fin) -> Self
    where
        Dep: Send + Sync + 'static,
        Fin: Finalizer<Dep> + Send + Sync,
    {
        self.finalizer = HookData {
            hook: boxed_finalizer(finalizer),
            target: TypeInfo::of::<Dep>(),
            explicit: true,
        };
        self
    }

    #[inline]
    #[must_use]
    pub fn get_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn get_scope(&self) -> Scope {
        self.scope
    }

    #[inline]
    #[must_use]
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> BeanName {
        BeanName {
            id: self.id.clone(),
            type_info: self.type_info,
        }
    }
}

impl Display for BeanDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.name(), f)
    }
}

impl fmt::Debug for BeanDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("id", &self.id)
            .field("type", &self.type_info.name)
            .field("scope", &self.scope)
            .field("args", &self.args.len())
            .field("properties", &self.properties.keys().map(String::as_str).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
