//! Node identity and the node traits.

use crate::Schema;
use cfgbind_types::NodeId;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Identity carried by every bound node.
///
/// Concrete node types embed one of these and hand it out through
/// [`NodeSchema::identity`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeHeader {
    uuid: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parent_uuid: Option<NodeId>,
    #[serde(default)]
    node_name: String,
}

impl NodeHeader {
    #[must_use]
    pub fn uuid(&self) -> &NodeId {
        &self.uuid
    }

    /// Identity of the node this one was bound under. `None` for roots.
    #[must_use]
    pub fn parent_uuid(&self) -> Option<&NodeId> {
        self.parent_uuid.as_ref()
    }

    /// The tag this node was bound from.
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn set_uuid(&mut self, uuid: NodeId) {
        self.uuid = uuid;
    }

    pub fn set_parent_uuid(&mut self, parent: Option<NodeId>) {
        self.parent_uuid = parent;
    }

    pub fn set_node_name(&mut self, name: &str) {
        self.node_name = name.to_string();
    }
}

/// Object-safe view of a bound configuration node.
///
/// Implemented for every [`NodeSchema`] type by a blanket impl; the engine
/// only ever handles nodes through `dyn ConfigNode`.
pub trait ConfigNode: Any + fmt::Debug + Send + Sync {
    /// The schema type name, e.g. `logger`.
    fn type_name(&self) -> &'static str;

    /// The type's schema.
    fn schema(&self) -> &'static Schema;

    fn header(&self) -> &NodeHeader;

    fn header_mut(&mut self) -> &mut NodeHeader;

    /// Key used to deduplicate and match collection entries.
    fn primary_key(&self) -> Option<String>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    fn clone_node(&self) -> Box<dyn ConfigNode>;

    fn uuid(&self) -> &NodeId {
        self.header().uuid()
    }

    fn parent_uuid(&self) -> Option<&NodeId> {
        self.header().parent_uuid()
    }

    fn node_name(&self) -> &str {
        self.header().node_name()
    }
}

impl<'a> dyn ConfigNode + 'a {
    /// Downcasts to a concrete node type.
    #[must_use]
    pub fn downcast_ref<T: ConfigNode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Downcasts to a concrete node type, mutably.
    pub fn downcast_mut<T: ConfigNode>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

impl Clone for Box<dyn ConfigNode> {
    fn clone(&self) -> Self {
        self.clone_node()
    }
}

/// Per-type declaration implemented by every concrete node type.
///
/// A type names itself, hands out its embedded [`NodeHeader`], and returns
/// its schema (typically cached in a `static OnceLock`, see
/// [`Schema::cached`]). Everything else comes from the blanket
/// [`ConfigNode`] impl.
pub trait NodeSchema: fmt::Debug + Clone + Default + Send + Sync + 'static {
    const TYPE_NAME: &'static str;

    fn node_schema() -> &'static Schema;

    fn identity(&self) -> &NodeHeader;

    fn identity_mut(&mut self) -> &mut NodeHeader;

    /// The node's domain key. Defaults to its uuid, once one is assigned.
    fn natural_key(&self) -> Option<String> {
        let uuid = self.identity().uuid();
        (!uuid.is_empty()).then(|| uuid.to_string())
    }
}

impl<T: NodeSchema> ConfigNode for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn schema(&self) -> &'static Schema {
        T::node_schema()
    }

    fn header(&self) -> &NodeHeader {
        self.identity()
    }

    fn header_mut(&mut self) -> &mut NodeHeader {
        self.identity_mut()
    }

    fn primary_key(&self) -> Option<String> {
        self.natural_key()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn clone_node(&self) -> Box<dyn ConfigNode> {
        Box::new(self.clone())
    }
}
