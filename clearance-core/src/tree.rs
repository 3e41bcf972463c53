//! Indexed resource tree.

use std::collections::BTreeMap;

use clearance_types::{ResourceNode, Resources};

#[derive(Debug, Clone)]
enum Node {
    File,
    Folder(BTreeMap<String, Node>),
}

impl Node {
    fn from_resource(node: &ResourceNode) -> Self {
        match node {
            ResourceNode::File(_) => Self::File,
            ResourceNode::Folder(children) => Self::Folder(
                children
                    .iter()
                    .map(|(k, v)| (k.clone(), Self::from_resource(v)))
                    .collect(),
            ),
        }
    }

    fn count(&self) -> usize {
        match self {
            Self::File => 1,
            Self::Folder(children) => 1 + children.values().map(Self::count).sum::<usize>(),
        }
    }
}

/// Walk control returned by visitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    /// Visit the node's children.
    Descend,
    /// Do not enter the node.
    Skip,
}

/// Node visited by [`ResourceTree::walk`].
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    /// Canonical path.
    pub path: &'a str,
    /// True for leaves.
    pub is_file: bool,
    /// True for the node the walk started at.
    pub is_start: bool,
}

/// Immutable scanned tree addressed by canonical paths.
///
/// Files are `/a/b/file`, folders `/a/b/`, the root is `/`.
#[derive(Debug, Clone)]
pub struct ResourceTree {
    root: Node,
    len: usize,
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new(&Resources::new())
    }
}

impl ResourceTree {
    /// Index a tree read from a project file.
    #[must_use]
    pub fn new(resources: &Resources) -> Self {
        let root = Node::Folder(
            resources
                .iter()
                .map(|(k, v)| (k.clone(), Node::from_resource(v)))
                .collect(),
        );
        let len = root.count();
        Self { root, len }
    }

    /// Number of nodes, root included.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when the root has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 1
    }

    fn lookup(&self, path: &str) -> Option<(&Node, String)> {
        let wants_folder = path.ends_with('/');
        let mut node = &self.root;
        let mut canonical = String::from("/");
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let Node::Folder(children) = node else {
                return None;
            };
            node = children.get(segment)?;
            canonical.push_str(segment);
            if matches!(node, Node::Folder(_)) {
                canonical.push('/');
            }
        }
        match node {
            Node::File if wants_folder => None,
            _ => Some((node, canonical)),
        }
    }

    /// Canonical form of `path`, or `None` when it names no node.
    ///
    /// Folders resolve with or without their trailing slash.
    #[must_use]
    pub fn canonicalize(&self, path: &str) -> Option<String> {
        if !path.starts_with('/') {
            return None;
        }
        self.lookup(path).map(|(_, canonical)| canonical)
    }

    /// True when `path` names a node.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.canonicalize(path).is_some()
    }

    /// True when `path` names a leaf.
    #[must_use]
    pub fn is_file(&self, path: &str) -> bool {
        matches!(self.lookup(path), Some((Node::File, _)))
    }

    /// Canonical paths of the direct children of a folder, in lexicographic order.
    #[must_use]
    pub fn children(&self, path: &str) -> Vec<String> {
        match self.lookup(path) {
            Some((Node::Folder(children), base)) => children
                .iter()
                .map(|(name, node)| child_path(&base, name, node))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Depth-first pre-order walk from `start`, children in lexicographic order.
    ///
    /// Each node is visited at most once. Returns `false` when `start` does
    /// not exist.
    pub fn walk<F>(&self, start: &str, mut visit: F) -> bool
    where
        F: FnMut(Visit<'_>) -> Walk,
    {
        let Some((node, path)) = self.lookup(start) else {
            return false;
        };
        let mut stack: Vec<(&Node, String, bool)> = vec![(node, path, true)];
        while let Some((node, path, is_start)) = stack.pop() {
            let control = visit(Visit {
                path: &path,
                is_file: matches!(node, Node::File),
                is_start,
            });
            if control == Walk::Skip {
                continue;
            }
            if let Node::Folder(children) = node {
                for (name, child) in children.iter().rev() {
                    stack.push((child, child_path(&path, name, child), false));
                }
            }
        }
        true
    }
}

fn child_path(base: &str, name: &str, node: &Node) -> String {
    match node {
        Node::File => format!("{base}{name}"),
        Node::Folder(_) => format!("{base}{name}/"),
    }
}
