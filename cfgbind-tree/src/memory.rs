//! In-memory configuration tree.

use crate::ConfigurationTree;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An owned, in-memory configuration tree node.
///
/// Conceptually one XML element: a name, attributes, optional text and
/// ordered child elements. Serializes to a compact JSON form, which makes
/// it handy for fixtures and diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigTree {
    name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ConfigTree>,
}

impl ConfigTree {
    /// Creates an empty node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds an attribute (builder style).
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets the text value (builder style).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Appends a child (builder style).
    #[must_use]
    pub fn with_child(mut self, child: ConfigTree) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the node's attributes in key order.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns all direct children in document order.
    #[must_use]
    pub fn all_children(&self) -> &[ConfigTree] {
        &self.children
    }

    /// Counts this node and every descendant.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(ConfigTree::node_count).sum::<usize>()
    }
}

impl ConfigurationTree for ConfigTree {
    fn with_name(name: &str) -> Self {
        Self::new(name)
    }

    fn node_name(&self) -> &str {
        &self.name
    }

    fn set_node_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    fn set_value(&mut self, value: String) {
        self.value = Some(value);
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    fn set_attribute(&mut self, key: &str, value: String) {
        self.attributes.insert(key.to_string(), value);
    }

    fn named_children(&self, name: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    fn child_or_insert(&mut self, name: &str) -> &mut Self {
        let index = match self.children.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                self.children.push(ConfigTree::new(name));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }

    fn add_child(&mut self, child: Self) {
        self.children.push(child);
    }
}
