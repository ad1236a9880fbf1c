//! Per-field binding metadata.

use crate::Schema;
use cfgbind_types::ScalarKind;
use serde::{Deserialize, Serialize};

/// The node type keyword for collection fields.
pub const ARRAY_TYPE: &str = "array";

/// Describes how one field of a node type maps onto a configuration tree.
///
/// `node_type` is kept as declared text: a scalar keyword, [`ARRAY_TYPE`],
/// or the name of another schema type. It is only resolved when a tree is
/// bound, so a typo in a declaration surfaces as a binding error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub field_name: String,
    pub node_type: String,
    /// Tree path, e.g. `name` or `params/param`. Defaults to the field name.
    pub path: String,
    /// Element type name. Only meaningful when `node_type` is `array`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
}

impl FieldBinding {
    /// Creates a binding with a raw node type, bound at the field's own name.
    pub fn new(field_name: &str, node_type: &str) -> Self {
        Self {
            field_name: field_name.into(),
            node_type: node_type.into(),
            path: field_name.into(),
            element_type: None,
        }
    }

    /// Shorthand for a scalar field.
    pub fn scalar(field_name: &str, kind: ScalarKind) -> Self {
        Self::new(field_name, kind.keyword())
    }

    /// Shorthand for a nested node field.
    pub fn node(field_name: &str, type_name: &str) -> Self {
        Self::new(field_name, type_name)
    }

    /// Shorthand for a collection field.
    pub fn array(field_name: &str, element_type: &str) -> Self {
        Self {
            element_type: Some(element_type.into()),
            ..Self::new(field_name, ARRAY_TYPE)
        }
    }

    /// Overrides the tree path.
    #[must_use]
    pub fn at(mut self, path: &str) -> Self {
        self.path = path.into();
        self
    }

    /// Returns true for collection bindings.
    #[must_use]
    pub fn is_array(&self) -> bool {
        self.node_type == ARRAY_TYPE
    }
}

/// A binding's node type after resolution against a registry.
#[derive(Debug, Clone, Copy)]
pub enum NodeType {
    Scalar(ScalarKind),
    /// A single nested node (plain or value wrapper).
    Node(&'static Schema),
    /// A collection of nodes of the element schema.
    Array(&'static Schema),
}

impl NodeType {
    /// Returns the declared keyword or type name this resolved from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Scalar(kind) => kind.keyword(),
            NodeType::Node(schema) => schema.type_name(),
            NodeType::Array(_) => ARRAY_TYPE,
        }
    }
}
