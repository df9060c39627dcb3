use core::fmt::{self, Display, Formatter};

/// Lifetime policy of a bean
///
/// ## Variants
/// - `Default`: behaves as [`Scope::Singleton`] for resolution and teardown,
///   but may also be requested by value, in which case the cached instance is cloned.
/// - `Singleton`: one shared instance per container, finalized on [`crate::Container::finalize`].
///   Never handed out by value.
/// - `Prototype`: a fresh instance per request, never cached nor finalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scope {
    #[default]
    Default,
    Singleton,
    Prototype,
}

impl Scope {
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Scope::Default => "default",
            Scope::Singleton => "singleton",
            Scope::Prototype => "prototype",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_cached(self) -> bool {
        !matches!(self, Scope::Prototype)
    }

    #[inline]
    #[must_use]
    pub const fn is_by_value_allowed(self) -> bool {
        !matches!(self, Scope::Singleton)
    }
}

impl Display for Scope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Scope::{self, *};

    #[test]
    fn test_default_is_cached() {
        assert_eq!(Scope::default(), Default);
        assert!(Default.is_cached());
        assert!(Singleton.is_cached());
        assert!(!Prototype.is_cached());
    }

    #[test]
    fn test_by_value() {
        assert!(Default.is_by_value_allowed());
        assert!(!Singleton.is_by_value_allowed());
        assert!(Prototype.is_by_value_allowed());
    }
}
