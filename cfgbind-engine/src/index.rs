//! Identity index over a bound graph.

use crate::EngineResult;
use cfgbind_model::{ConfigNode, FieldRef};
use cfgbind_types::NodeId;
use std::collections::HashMap;
use tracing::warn;

/// Looks up nodes of a graph by uuid and follows parent links.
///
/// Built by walking every nested node and collection element reachable
/// from the root. When two nodes share a uuid the later one in walk order
/// is indexed.
#[derive(Debug)]
pub struct GraphIndex<'g> {
    root: NodeId,
    nodes: HashMap<NodeId, &'g dyn ConfigNode>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl<'g> GraphIndex<'g> {
    /// Indexes the graph below `root`.
    pub fn build(root: &'g dyn ConfigNode) -> EngineResult<Self> {
        let mut index = Self {
            root: root.uuid().clone(),
            nodes: HashMap::new(),
            children: HashMap::new(),
        };
        index.visit(root)?;
        Ok(index)
    }

    fn visit(&mut self, node: &'g dyn ConfigNode) -> EngineResult<()> {
        let id = node.uuid().clone();
        if self.nodes.insert(id.clone(), node).is_some() {
            warn!(uuid = %id, node_type = node.type_name(), "Duplicate uuid in graph");
        }
        let schema = node.schema();
        for binding in schema.bindings() {
            if schema.shape(&binding.field_name).is_none() {
                continue;
            }
            let nested: Vec<&'g dyn ConfigNode> = match schema.read(node, &binding.field_name)? {
                FieldRef::Scalar(_) | FieldRef::Node(None) => Vec::new(),
                FieldRef::Node(Some(child)) => vec![child],
                FieldRef::Collection(entries) => entries.into_iter().map(|(_, c)| c).collect(),
            };
            for child in nested {
                self.children
                    .entry(id.clone())
                    .or_default()
                    .push(child.uuid().clone());
                self.visit(child)?;
            }
        }
        Ok(())
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> Option<&'g dyn ConfigNode> {
        self.get(&self.root)
    }

    #[must_use]
    pub fn get(&self, uuid: &NodeId) -> Option<&'g dyn ConfigNode> {
        self.nodes.get(uuid).copied()
    }

    /// The node `uuid` was bound under.
    #[must_use]
    pub fn parent_of(&self, uuid: &NodeId) -> Option<&'g dyn ConfigNode> {
        let parent = self.get(uuid)?.parent_uuid()?;
        self.get(parent)
    }

    /// Direct children of `uuid`, in field declaration then collection order.
    #[must_use]
    pub fn children_of(&self, uuid: &NodeId) -> Vec<&'g dyn ConfigNode> {
        self.children
            .get(uuid)
            .map(|ids| ids.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    /// Nodes of the given type, in no particular order.
    #[must_use]
    pub fn of_type(&self, type_name: &str) -> Vec<&'g dyn ConfigNode> {
        self.nodes
            .values()
            .copied()
            .filter(|n| n.type_name() == type_name)
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
