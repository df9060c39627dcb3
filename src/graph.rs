use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::{String, ToString as _},
    vec::Vec,
};

#[derive(Debug, Default)]
struct Node {
    parents: BTreeSet<String>,
}

/// Directed graph of dependencies between named beans, used to reject cycles on build.
/// An edge `child -> parent` means that `parent` requires `child` to be built.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    nodes: BTreeMap<String, Node>,
}

impl DependencyGraph {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: BTreeMap::new() }
    }

    /// Records that `parent` depends on `child`.
    ///
    /// Returns `false` and leaves the graph untouched if the edge would close a cycle,
    /// self-dependencies included.
    pub fn add_dependency(&mut self, child: &str, parent: &str) -> bool {
        if child == parent || self.is_reachable(parent, child) {
            return false;
        }

        self.nodes.entry(parent.to_string()).or_default();
        self.nodes
            .entry(child.to_string())
            .or_default()
            .parents
            .insert(parent.to_string());
        true
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Beans that directly depend on `id`
    #[must_use]
    pub fn parents(&self, id: &str) -> Vec<&str> {
        self.nodes
            .get(id)
            .map(|node| node.parents.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Whether `to` depends, directly or not, on `from`
    fn is_reachable(&self, from: &str, to: &str) -> bool {
        let mut visited = BTreeSet::new();
        let mut stack = alloc::vec![from];

        while let Some(id) = stack.pop() {
            if id == to {
                return true;
            }
            if !visited.insert(id) {
                continue;
            }
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.parents.iter().map(String::as_str));
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::DependencyGraph;

    #[test]
    fn test_self_dependency() {
        let mut graph = DependencyGraph::new();
        assert!(!graph.add_dependency("a", "a"));
        assert!(!graph.contains("a"));
    }

    #[test]
    fn test_direct_cycle() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_dependency("a", "b"));
        assert!(!graph.add_dependency("b", "a"));
        assert!(graph.contains("a") && graph.contains("b"));
        assert_eq!(graph.parents("a"), ["b"]);
        assert!(graph.parents("b").is_empty());
    }

    #[test]
    fn test_transitive_cycle() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_dependency("a", "b"));
        assert!(graph.add_dependency("b", "c"));
        assert!(!graph.add_dependency("c", "a"));
    }

    #[test]
    fn test_diamond_is_not_cycle() {
        let mut graph = DependencyGraph::new();
        assert!(graph.add_dependency("db", "repo"));
        assert!(graph.add_dependency("db", "cache"));
        assert!(graph.add_dependency("repo", "service"));
        assert!(graph.add_dependency("cache", "service"));
        assert!(graph.add_dependency("db", "service"));
        assert_eq!(graph.parents("db"), ["cache", "repo", "service"]);
    }
}
