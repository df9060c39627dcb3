use alloc::collections::{btree_map::BTreeMap, vec_deque::VecDeque};
use core::fmt::{self, Display, Formatter};

use crate::any::RcAny;

/// Stages a cached bean goes through
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LifecycleState {
    Constructed,
    PropertiesInjected,
    Initialized,
    Finalized,
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Constructed => "constructed",
            LifecycleState::PropertiesInjected => "properties injected",
            LifecycleState::Initialized => "initialized",
            LifecycleState::Finalized => "finalized",
        })
    }
}

pub(crate) struct Cached {
    pub(crate) dependency: RcAny,
    pub(crate) state: LifecycleState,
}

/// Instances of cacheable beans by registry index
#[derive(Default)]
pub(crate) struct Cache {
    map: BTreeMap<usize, Cached>,
    resolved: ResolvedSet,
}

impl Cache {
    #[inline]
    #[must_use]
    pub(crate) const fn new() -> Self {
        Self {
            map: BTreeMap::new(),
            resolved: ResolvedSet::new(),
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn get(&self, index: usize) -> Option<RcAny> {
        self.map.get(&index).map(|cached| cached.dependency.clone())
    }

    /// Caches an initialized instance and pushes it to the finalization ledger
    pub(crate) fn insert(&mut self, index: usize, dependency: RcAny) {
        self.map.insert(
            index,
            Cached {
                dependency,
                state: LifecycleState::Initialized,
            },
        );
        self.resolved.push(index);
    }

    #[inline]
    #[must_use]
    pub(crate) fn state(&self, index: usize) -> Option<LifecycleState> {
        self.map.get(&index).map(|cached| cached.state)
    }

    pub(crate) fn mark_finalized(&mut self, index: usize) {
        if let Some(cached) = self.map.get_mut(&index) {
            cached.state = LifecycleState::Finalized;
        }
    }

    /// Takes the most recently initialized bean that isn't finalized yet
    #[inline]
    pub(crate) fn pop_resolved(&mut self) -> Option<(usize, RcAny)> {
        let index = self.resolved.pop()?;
        let dependency = self.get(index)?;
        Some((index, dependency))
    }

    #[inline]
    #[must_use]
    #[cfg(test)]
    pub(crate) fn resolved_len(&self) -> usize {
        self.resolved.0.len()
    }
}

#[derive(Default)]
pub(crate) struct ResolvedSet(VecDeque<usize>);

impl ResolvedSet {
    pub(crate) const fn new() -> Self {
        Self(VecDeque::new())
    }

    pub(crate) fn push(&mut self, index: usize) {
        self.0.push_back(index);
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.0.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::{Cache, LifecycleState};

    use alloc::sync::Arc;

    #[test]
    fn test_insert_and_get() {
        let mut cache = Cache::new();
        assert!(cache.get(0).is_none());
        assert_eq!(cache.state(0), None);

        cache.insert(0, Arc::new(1u8));
        assert_eq!(*cache.get(0).unwrap().downcast::<u8>().unwrap(), 1);
        assert_eq!(cache.state(0), Some(LifecycleState::Initialized));
        assert_eq!(cache.resolved_len(), 1);
    }

    #[test]
    fn test_pop_resolved_lifo() {
        let mut cache = Cache::new();
        cache.insert(3, Arc::new(3u8));
        cache.insert(1, Arc::new(1u8));
        cache.insert(2, Arc::new(2u8));

        let order: alloc::vec::Vec<_> = core::iter::from_fn(|| cache.pop_resolved().map(|(index, _)| index)).collect();
        assert_eq!(order, [2, 1, 3]);
    }

    #[test]
    fn test_mark_finalized_keeps_instance() {
        let mut cache = Cache::new();
        cache.insert(0, Arc::new(1u8));
        cache.mark_finalized(0);
        assert_eq!(cache.state(0), Some(LifecycleState::Finalized));
        assert!(cache.get(0).is_some());
    }
}
