//! Object graph binder: builds typed nodes from configuration trees.

use crate::{EngineConfig, EngineError, EngineResult, IdentityAssigner};
use cfgbind_model::{
    ConfigNode, FieldBinding, FieldValue, KeyedCollection, NodeSchema, NodeType, Schema,
    SchemaRegistry,
};
use cfgbind_tree::{ConfigurationTree, segments};
use cfgbind_types::ScalarValue;
use tracing::{debug, trace, warn};

/// Where a node's identity comes from.
#[derive(Debug, Clone, Copy)]
enum IdentitySource {
    /// The node owns its tree node: take the tree's uuid if present.
    Tree,
    /// The node shares its tree node with its parent (value wrappers).
    Fresh,
}

/// Binds configuration trees into typed node graphs.
///
/// Every field declared in a type's schema is bound according to its
/// resolved node type:
/// - scalars are read from the tree's data at the field path and cast;
/// - value-wrapper nodes are bound against the same tree node, and are left
///   unset (with none of their own fields read) when that node has no text;
/// - plain nodes are bound from the first child at the field path;
/// - collections are bound from every child at the field path and keyed by
///   each element's primary key (later entries win).
///
/// Missing data leaves the field at its default. Nested nodes and collection
/// elements get the enclosing node's uuid as their parent.
#[derive(Debug, Clone)]
pub struct ObjectGraphBinder<'r> {
    registry: &'r SchemaRegistry,
    config: EngineConfig,
    identity: IdentityAssigner,
}

impl<'r> ObjectGraphBinder<'r> {
    /// Creates a binder with the default config.
    #[must_use]
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_config(registry, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(registry: &'r SchemaRegistry, config: EngineConfig) -> Self {
        let identity = IdentityAssigner::new(&config.uuid_key);
        Self {
            registry,
            config,
            identity,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Binds `tree` as a node of the registered type `type_name`.
    pub fn bind<T: ConfigurationTree>(
        &self,
        tree: &T,
        type_name: &str,
    ) -> EngineResult<Box<dyn ConfigNode>> {
        let schema = self.registry.schema(type_name).ok_or_else(|| {
            EngineError::MappingConfiguration(format!("unknown node type {type_name}"))
        })?;
        self.bind_node(tree, schema, IdentitySource::Tree)
    }

    /// Binds `tree` as a node of type `N`.
    pub fn bind_as<N: NodeSchema, T: ConfigurationTree>(&self, tree: &T) -> EngineResult<N> {
        let node = self.bind_node(tree, N::node_schema(), IdentitySource::Tree)?;
        let found = node.type_name();
        node.into_any()
            .downcast::<N>()
            .map(|n| *n)
            .map_err(|_| {
                EngineError::MappingConfiguration(format!(
                    "bound node of type {found}, expected {}",
                    N::TYPE_NAME
                ))
            })
    }

    fn bind_node<T: ConfigurationTree>(
        &self,
        tree: &T,
        schema: &'static Schema,
        source: IdentitySource,
    ) -> EngineResult<Box<dyn ConfigNode>> {
        let mut node = schema.instantiate();
        match source {
            IdentitySource::Tree => self.identity.assign(tree, node.header_mut()),
            IdentitySource::Fresh => self.identity.assign_fresh(node.header_mut()),
        }
        node.header_mut().set_node_name(tree.node_name());
        debug!(
            node_type = schema.type_name(),
            uuid = %node.uuid(),
            "Binding node <{}>",
            tree.node_name()
        );

        if let Some(kind) = schema.value_kind() {
            if let Some(raw) = tree.value() {
                let value = ScalarValue::cast(raw, kind).map_err(|e| {
                    EngineError::MappingConfiguration(format!(
                        "value of node {}: {e}",
                        schema.type_name()
                    ))
                })?;
                schema.write_value(node.as_mut(), value)?;
            }
        }

        for binding in schema.bindings() {
            self.bind_field(tree, schema, node.as_mut(), binding)?;
        }
        Ok(node)
    }

    fn bind_field<T: ConfigurationTree>(
        &self,
        tree: &T,
        schema: &'static Schema,
        node: &mut dyn ConfigNode,
        binding: &FieldBinding,
    ) -> EngineResult<()> {
        let owner = schema.type_name();
        let field = binding.field_name.as_str();
        let node_type = self.registry.node_type(owner, binding)?;
        let path = segments(&binding.path, self.config.path_separator).map_err(|e| {
            EngineError::MappingConfiguration(format!("field {field} of node {owner}: {e}"))
        })?;
        trace!(node_type = owner, field, kind = node_type.name(), "Binding field");

        match node_type {
            NodeType::Scalar(kind) => {
                let Some(raw) = tree.data(&path) else {
                    return Ok(());
                };
                let value = ScalarValue::cast(raw, kind).map_err(|e| {
                    EngineError::MappingConfiguration(format!(
                        "field {field} of node {owner}: {e}"
                    ))
                })?;
                schema.write(node, field, FieldValue::Scalar(value))?;
            }
            NodeType::Node(nested) if nested.is_value_wrapper() => {
                if tree.value().is_none() {
                    return Ok(());
                }
                let mut child = self.bind_node(tree, nested, IdentitySource::Fresh)?;
                child.header_mut().set_parent_uuid(Some(node.uuid().clone()));
                schema.write(node, field, FieldValue::Node(child))?;
            }
            NodeType::Node(nested) => {
                let Some(subtree) = tree.child(&path) else {
                    return Ok(());
                };
                let mut child = self.bind_node(subtree, nested, IdentitySource::Tree)?;
                child.header_mut().set_parent_uuid(Some(node.uuid().clone()));
                schema.write(node, field, FieldValue::Node(child))?;
            }
            NodeType::Array(element) => {
                let mut items = KeyedCollection::new();
                for subtree in tree.children(&path) {
                    let mut child = self.bind_node(subtree, element, IdentitySource::Tree)?;
                    child.header_mut().set_parent_uuid(Some(node.uuid().clone()));
                    let key = child.primary_key();
                    if !self.config.deduplicate_collections {
                        items.push(key, child);
                    } else if let Some(replaced) = items.insert_keyed(key.clone(), child) {
                        warn!(
                            node_type = owner,
                            field,
                            key = key.as_deref().unwrap_or_default(),
                            "Duplicate collection key, replacing entry {}",
                            replaced.uuid()
                        );
                    }
                }
                schema.write(node, field, FieldValue::Collection(items))?;
            }
        }
        Ok(())
    }
}
