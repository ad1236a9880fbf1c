//! Schema registry: resolves type names and field metadata.

use crate::{ARRAY_TYPE, FieldBinding, ModelError, ModelResult, NodeSchema, NodeType, Schema};
use cfgbind_types::ScalarKind;
use std::collections::HashMap;

/// Maps schema type names to their schemas.
///
/// Built once at bootstrap (registering a type also registers every node
/// type reachable from its accessors), then shared read-only across
/// concurrent binds.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, &'static Schema>,
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T` and every node type reachable from it.
    pub fn register<T: NodeSchema>(&mut self) -> &mut Self {
        self.register_schema(T::node_schema());
        self
    }

    /// Registers a schema and every node type reachable from it.
    pub fn register_schema(&mut self, schema: &'static Schema) {
        let mut pending = vec![schema];
        while let Some(next) = pending.pop() {
            if self.schemas.insert(next.type_name(), next).is_none() {
                pending.extend(next.nested_schemas());
            }
        }
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with<T: NodeSchema>(mut self) -> Self {
        self.register::<T>();
        self
    }

    #[must_use]
    pub fn schema(&self, type_name: &str) -> Option<&'static Schema> {
        self.schemas.get(type_name).copied()
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Binding metadata for `field` on `type_name`.
    ///
    /// `None` when the type is unknown or the field carries no binding.
    #[must_use]
    pub fn resolve(&self, type_name: &str, field: &str) -> Option<&'static FieldBinding> {
        self.schema(type_name)?.binding(field)
    }

    /// Resolves a binding's declared node type.
    pub fn node_type(&self, owner: &str, binding: &FieldBinding) -> ModelResult<NodeType> {
        if let Some(kind) = ScalarKind::from_keyword(&binding.node_type) {
            return Ok(NodeType::Scalar(kind));
        }
        if binding.node_type == ARRAY_TYPE {
            let element = binding
                .element_type
                .as_deref()
                .ok_or_else(|| ModelError::MissingElementType {
                    field: binding.field_name.clone(),
                    owner: owner.into(),
                })?;
            return self
                .schema(element)
                .map(NodeType::Array)
                .ok_or_else(|| ModelError::InvalidPropertyType {
                    node_type: element.into(),
                    owner: owner.into(),
                });
        }
        self.schema(&binding.node_type)
            .map(NodeType::Node)
            .ok_or_else(|| ModelError::InvalidPropertyType {
                node_type: binding.node_type.clone(),
                owner: owner.into(),
            })
    }
}
