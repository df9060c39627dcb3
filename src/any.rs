use alloc::{boxed::Box, sync::Arc};
use core::{
    any::{type_name, Any, TypeId},
    fmt::{self, Display, Formatter},
};

pub(crate) type BoxAny = Box<dyn Any + Send + Sync>;
pub(crate) type RcAny = Arc<dyn Any + Send + Sync>;

/// Type prefixes of `core::any::type_name` output that describe an indirection instead of a value shape.
///
/// # Notes
/// Only pointers and smart pointers of `core` and `alloc` are listed.
/// Wrappers from other crates and user defined pointer types aren't detected,
/// and `type_name` output isn't guaranteed to be stable between compiler versions.
const INDIRECTION_PREFIXES: [&str; 11] = [
    "&",
    "*const ",
    "*mut ",
    "alloc::boxed::Box<",
    "alloc::sync::Arc<",
    "alloc::sync::Weak<",
    "alloc::rc::Rc<",
    "alloc::rc::Weak<",
    "alloc::borrow::Cow<",
    "core::pin::Pin<",
    "core::ptr::non_null::NonNull<",
];

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let path = self.name.split_once('<').map_or(self.name, |(path, _)| path);
        let start = path.rfind("::").map_or(0, |index| index + 2);
        &self.name[start..]
    }

    #[must_use]
    pub fn is_indirection(&self) -> bool {
        INDIRECTION_PREFIXES.iter().any(|prefix| self.name.starts_with(prefix))
    }
}
