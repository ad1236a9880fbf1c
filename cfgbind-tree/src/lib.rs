//! Hierarchical configuration trees.
//!
//! The binder reads from and the exporter writes to anything implementing
//! [`ConfigurationTree`]: a named node carrying keyed data (attributes), an
//! optional text value and ordered children. [`ConfigTree`] is the in-memory
//! implementation used by fixtures, tests and JSON dumps; an XML-backed
//! implementation only needs to provide the primitive operations.

mod memory;
mod path;

pub use memory::ConfigTree;
pub use path::{DEFAULT_SEPARATOR, PathError, split_head, segments};

/// Read/write access to one node of a configuration tree.
///
/// Implementors provide the primitive single-segment operations; the
/// path-based lookups are derived from them. A path is given as its
/// segments, already split (see [`segments`]).
pub trait ConfigurationTree: Sized {
    /// Creates an empty node with the given name.
    fn with_name(name: &str) -> Self;

    /// Returns the node's name (its tag).
    fn node_name(&self) -> &str;

    /// Renames the node.
    fn set_node_name(&mut self, name: &str);

    /// Returns the node's own text value.
    fn value(&self) -> Option<&str>;

    /// Sets the node's own text value.
    fn set_value(&mut self, value: String);

    /// Returns the attribute stored under `key` on this node.
    fn attribute(&self, key: &str) -> Option<&str>;

    /// Stores an attribute on this node, replacing any previous value.
    fn set_attribute(&mut self, key: &str, value: String);

    /// Returns the direct children named `name`, in document order.
    fn named_children(&self, name: &str) -> Vec<&Self>;

    /// Returns the first direct child named `name`, creating it if absent.
    fn child_or_insert(&mut self, name: &str) -> &mut Self;

    /// Appends a child node.
    fn add_child(&mut self, child: Self);

    /// Returns every node reached by following `path` from this node.
    ///
    /// Each segment fans out over all matching children, so the result is
    /// the full set of matches in document order. An empty path yields
    /// nothing.
    fn children(&self, path: &[&str]) -> Vec<&Self> {
        if path.is_empty() {
            return Vec::new();
        }
        let mut current: Vec<&Self> = vec![self];
        for segment in path {
            current = current
                .into_iter()
                .flat_map(|node| node.named_children(segment))
                .collect();
            if current.is_empty() {
                break;
            }
        }
        current
    }

    /// Returns the first node reached by following `path`.
    fn child(&self, path: &[&str]) -> Option<&Self> {
        self.children(path).into_iter().next()
    }

    /// Reads scalar data at `path`.
    ///
    /// All but the last segment select child nodes; the last segment names
    /// an attribute. When no selected node has that attribute, the text
    /// value of the first child element with that name is used instead.
    fn data(&self, path: &[&str]) -> Option<&str> {
        let (key, parents) = path.split_last()?;
        let holders: Vec<&Self> = if parents.is_empty() {
            vec![self]
        } else {
            self.children(parents)
        };
        holders
            .iter()
            .copied()
            .find_map(|node| node.attribute(key))
            .or_else(|| {
                holders
                    .iter()
                    .copied()
                    .flat_map(|node| node.named_children(key))
                    .find_map(|element| element.value())
            })
    }

    /// Writes scalar data at `path`, creating intermediate nodes as needed.
    fn set_data(&mut self, path: &[&str], value: String) {
        let Some((key, parents)) = path.split_last() else {
            return;
        };
        let mut node = self;
        for segment in parents {
            node = node.child_or_insert(segment);
        }
        node.set_attribute(key, value);
    }
}
