//! The module hierarchy and level inheritance.
//!
//! Modules are dotted, case-insensitive names. Every module except the root
//! has exactly one parent: its name minus the last segment. Nodes live in an
//! arena and refer to their parent by [`ModuleId`], so the tree never owns
//! itself through pointers.
//!
//! ```text
//!   ""  (root, WARNING)
//!    └── "net"        UNSPECIFIED ──► effective WARNING
//!         └── "net.http"  DEBUG   ──► effective DEBUG
//! ```

use crate::entry::ROOT_NAME;
use crate::level::Level;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use std::collections::HashMap;
use std::sync::Arc;

/// Stable handle to a node in a [`ModuleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleId(usize);

impl ModuleId {
    pub const ROOT: ModuleId = ModuleId(0);

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

#[derive(Debug)]
struct Node {
    name: Arc<str>,
    level: Level,
    parent: Option<ModuleId>,
}

#[derive(Debug)]
struct Arena {
    nodes: Vec<Node>,
    index: HashMap<Arc<str>, ModuleId>,
}

impl Arena {
    fn new(root_level: Level) -> Self {
        let root: Arc<str> = Arc::from("");
        let mut index = HashMap::new();
        index.insert(Arc::clone(&root), ModuleId::ROOT);
        Self {
            nodes: vec![Node {
                name: root,
                level: root_level,
                parent: None,
            }],
            index,
        }
    }

    /// Find or create `name`, creating missing ancestors first.
    fn ensure(&mut self, name: &str) -> ModuleId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let parent = match name.rfind('.') {
            Some(pos) => self.ensure(&name[..pos]),
            None => ModuleId::ROOT,
        };

        let id = ModuleId(self.nodes.len());
        let name: Arc<str> = Arc::from(name);
        self.nodes.push(Node {
            name: Arc::clone(&name),
            level: Level::Unspecified,
            parent: Some(parent),
        });
        self.index.insert(name, id);
        id
    }

    fn node(&self, id: ModuleId) -> Option<&Node> {
        self.nodes.get(id.0)
    }
}

/// Concurrent table of modules and their configured levels.
#[derive(Debug)]
pub struct ModuleTree {
    root_level: Level,
    inner: RwLock<Arena>,
}

impl Default for ModuleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleTree {
    /// A tree whose root starts (and resets) at WARNING.
    pub fn new() -> Self {
        Self::with_root_level(Level::Warning)
    }

    pub fn with_root_level(root_level: Level) -> Self {
        Self {
            root_level,
            inner: RwLock::new(Arena::new(root_level)),
        }
    }

    /// Resolve `name` to its node, creating it and its ancestors if needed.
    ///
    /// Concurrent callers asking for the same new name always get the same node.
    pub fn get(&self, name: &str) -> ModuleId {
        let name = normalize(name);

        let existing = self.inner.read().index.get(name.as_str()).copied();
        if let Some(id) = existing {
            return id;
        }

        let arena = self.inner.upgradable_read();
        if let Some(&id) = arena.index.get(name.as_str()) {
            return id;
        }
        let mut arena = RwLockUpgradableReadGuard::upgrade(arena);
        let id = arena.ensure(&name);
        tracing::trace!(module = %name, "Created module");
        id
    }

    /// Normalized name; the root is `""`.
    pub fn name(&self, id: ModuleId) -> Arc<str> {
        self.inner
            .read()
            .node(id)
            .map(|node| Arc::clone(&node.name))
            .unwrap_or_else(|| Arc::from(""))
    }

    pub fn parent(&self, id: ModuleId) -> Option<ModuleId> {
        self.inner.read().node(id).and_then(|node| node.parent)
    }

    /// The level configured on this node alone; may be UNSPECIFIED.
    pub fn level(&self, id: ModuleId) -> Level {
        self.inner
            .read()
            .node(id)
            .map(|node| node.level)
            .unwrap_or_default()
    }

    /// Walk towards the root until a node with an explicit level is found.
    ///
    /// Returns UNSPECIFIED only when the root itself has been set to
    /// UNSPECIFIED, which callers treat as "nothing is enabled".
    pub fn effective_level(&self, id: ModuleId) -> Level {
        let arena = self.inner.read();
        let mut current = arena.node(id);
        while let Some(node) = current {
            if node.level.is_specified() {
                return node.level;
            }
            current = node.parent.and_then(|parent| arena.node(parent));
        }
        Level::Unspecified
    }

    /// Set this node's own level. Descendants are untouched.
    pub fn set_level(&self, id: ModuleId, level: Level) {
        if let Some(node) = self.inner.write().nodes.get_mut(id.0) {
            node.level = level;
        }
    }

    /// Clear every configured level; the root returns to its default.
    ///
    /// Known module names are kept.
    pub fn reset_levels(&self) {
        let mut arena = self.inner.write();
        for node in arena.nodes.iter_mut() {
            node.level = Level::Unspecified;
        }
        if let Some(root) = arena.nodes.get_mut(ModuleId::ROOT.0) {
            root.level = self.root_level;
        }
    }

    /// Explicitly configured levels as `name=LEVEL` pairs, sorted by name and
    /// joined with commas. The root is omitted while it holds its default.
    pub fn config(&self) -> String {
        let arena = self.inner.read();
        let mut entries: Vec<(&str, Level)> = arena
            .nodes
            .iter()
            .enumerate()
            .filter(|(index, node)| {
                node.level.is_specified()
                    && !(*index == ModuleId::ROOT.0 && node.level == self.root_level)
            })
            .map(|(_, node)| (&*node.name, node.level))
            .collect();
        // Root is stored as "" and so sorts first.
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
            .into_iter()
            .map(|(name, level)| format!("{}={}", display_name(name), level))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Number of known modules, root included.
    pub fn module_count(&self) -> usize {
        self.inner.read().nodes.len()
    }
}

/// Lower-case, trimmed, with empty segments dropped: `" .A..B. "` is `"a.b"`.
pub fn normalize(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

pub(crate) fn display_name(name: &str) -> &str {
    if name.is_empty() { ROOT_NAME } else { name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("TESTING.MODULE"), "testing.module");
        assert_eq!(normalize("  Net.Http  "), "net.http");
        assert_eq!(normalize(".a..b."), "a.b");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn test_get_creates_ancestors() {
        let tree = ModuleTree::new();
        let leaf = tree.get("a.b.c");

        assert_eq!(tree.module_count(), 4);
        let b = tree.parent(leaf).unwrap();
        assert_eq!(&*tree.name(b), "a.b");
        let a = tree.parent(b).unwrap();
        assert_eq!(&*tree.name(a), "a");
        assert_eq!(tree.parent(a), Some(ModuleId::ROOT));
        assert_eq!(tree.parent(ModuleId::ROOT), None);
    }

    #[test]
    fn test_get_is_idempotent_and_case_insensitive() {
        let tree = ModuleTree::new();
        let first = tree.get("Net.HTTP");
        let second = tree.get("net.http");
        assert_eq!(first, second);
        assert_eq!(tree.get(""), ModuleId::ROOT);
        assert_eq!(tree.get(".."), ModuleId::ROOT);
    }

    #[test]
    fn test_effective_level_inherits() {
        let tree = ModuleTree::new();
        let first = tree.get("first");
        let second = tree.get("first.second");

        tree.set_level(ModuleId::ROOT, Level::Error);
        assert_eq!(tree.effective_level(second), Level::Error);

        tree.set_level(first, Level::Debug);
        assert_eq!(tree.effective_level(second), Level::Debug);
        assert_eq!(tree.effective_level(ModuleId::ROOT), Level::Error);

        tree.set_level(second, Level::Info);
        assert_eq!(tree.effective_level(second), Level::Info);

        tree.set_level(first, Level::Unspecified);
        assert_eq!(tree.effective_level(first), Level::Error);
        assert_eq!(tree.effective_level(second), Level::Info);
    }

    #[test]
    fn test_unspecified_root_has_no_effective_level() {
        let tree = ModuleTree::new();
        let leaf = tree.get("a.b");
        tree.set_level(ModuleId::ROOT, Level::Unspecified);

        assert_eq!(tree.effective_level(leaf), Level::Unspecified);
        assert_eq!(tree.effective_level(ModuleId::ROOT), Level::Unspecified);
    }

    #[test]
    fn test_reset_levels_keeps_names() {
        let tree = ModuleTree::new();
        let module = tree.get("kept.module");
        tree.set_level(module, Level::Trace);
        tree.set_level(ModuleId::ROOT, Level::Critical);

        tree.reset_levels();

        assert_eq!(tree.level(module), Level::Unspecified);
        assert_eq!(tree.level(ModuleId::ROOT), Level::Warning);
        assert_eq!(tree.module_count(), 3);
        assert_eq!(tree.get("kept.module"), module);
    }

    #[test]
    fn test_custom_root_level() {
        let tree = ModuleTree::with_root_level(Level::Info);
        assert_eq!(tree.effective_level(tree.get("x")), Level::Info);
        assert_eq!(tree.config(), "");

        tree.set_level(ModuleId::ROOT, Level::Error);
        tree.reset_levels();
        assert_eq!(tree.level(ModuleId::ROOT), Level::Info);
    }

    #[test]
    fn test_config() {
        let tree = ModuleTree::new();
        assert_eq!(tree.config(), "");

        tree.set_level(tree.get("zeta"), Level::Error);
        tree.set_level(tree.get("alpha.beta"), Level::Debug);
        tree.get("alpha");
        assert_eq!(tree.config(), "alpha.beta=DEBUG,zeta=ERROR");

        tree.set_level(ModuleId::ROOT, Level::Info);
        assert_eq!(tree.config(), "<root>=INFO,alpha.beta=DEBUG,zeta=ERROR");

        tree.set_level(ModuleId::ROOT, Level::Unspecified);
        assert_eq!(tree.config(), "alpha.beta=DEBUG,zeta=ERROR");
    }

    #[test]
    fn test_config_orders_parent_before_child() {
        let tree = ModuleTree::new();
        tree.set_level(tree.get("a.b"), Level::Debug);
        tree.set_level(tree.get("a"), Level::Info);
        tree.set_level(tree.get("a-z"), Level::Error);
        tree.set_level(ModuleId::ROOT, Level::Trace);

        assert_eq!(tree.config(), "<root>=TRACE,a=INFO,a-z=ERROR,a.b=DEBUG");
    }

    #[test]
    fn test_concurrent_get_creates_single_node() {
        let tree = Arc::new(ModuleTree::new());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || {
                    (0..50)
                        .map(|i| tree.get(&format!("shared.m{i}")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let results: Vec<Vec<ModuleId>> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();

        assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
        // root + "shared" + 50 leaves
        assert_eq!(tree.module_count(), 52);
    }
}
