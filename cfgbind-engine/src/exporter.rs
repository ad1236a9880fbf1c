//! Graph exporter: serializes typed graphs back into configuration trees.

use crate::{EngineConfig, EngineError, EngineResult};
use cfgbind_model::{ConfigNode, FieldBinding, FieldRef};
use cfgbind_tree::{ConfigurationTree, segments, split_head};
use tracing::trace;

/// Exports node graphs to configuration trees.
///
/// The mirror image of [`ObjectGraphBinder`](crate::ObjectGraphBinder):
/// scalars become data at their path, value wrappers write into the same
/// tree node, nested nodes and collection elements become child trees
/// attached under their path. Unset fields are skipped.
#[derive(Debug, Clone, Default)]
pub struct GraphExporter {
    config: EngineConfig,
}

impl GraphExporter {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Exports `node` and everything below it.
    ///
    /// The root tree is named after the node's bound name, falling back to
    /// its type name for nodes built in code.
    pub fn export<T: ConfigurationTree>(&self, node: &dyn ConfigNode) -> EngineResult<T> {
        let name = match node.node_name() {
            "" => node.type_name(),
            name => name,
        };
        let mut tree = T::with_name(name);
        self.export_into(node, &mut tree, true)?;
        Ok(tree)
    }

    fn export_into<T: ConfigurationTree>(
        &self,
        node: &dyn ConfigNode,
        tree: &mut T,
        with_identity: bool,
    ) -> EngineResult<()> {
        let schema = node.schema();
        if with_identity && self.config.export_identity && !node.uuid().is_empty() {
            tree.set_attribute(&self.config.uuid_key, node.uuid().to_string());
        }
        if schema.is_value_wrapper() {
            if let Some(value) = schema.read_value(node)? {
                tree.set_value(value.to_string());
            }
        }

        for binding in schema.bindings() {
            // Declared-only bindings have no accessor to read from.
            if schema.shape(&binding.field_name).is_none() {
                continue;
            }
            match schema.read(node, &binding.field_name)? {
                FieldRef::Scalar(None) | FieldRef::Node(None) => {}
                FieldRef::Scalar(Some(value)) => {
                    let path = self.scalar_path(binding)?;
                    tree.set_data(&path, value.to_string());
                }
                FieldRef::Node(Some(child)) if child.schema().is_value_wrapper() => {
                    self.export_into(child, tree, false)?;
                }
                FieldRef::Node(Some(child)) => {
                    let exported = self.export_child(child)?;
                    self.attach(tree, &binding.path, &binding.path, vec![exported])?;
                }
                FieldRef::Collection(entries) => {
                    if entries.is_empty() {
                        continue;
                    }
                    let exported = entries
                        .into_iter()
                        .map(|(_, child)| self.export_child(child))
                        .collect::<EngineResult<Vec<T>>>()?;
                    self.attach(tree, &binding.path, &binding.path, exported)?;
                }
            }
        }
        Ok(())
    }

    fn export_child<T: ConfigurationTree>(&self, child: &dyn ConfigNode) -> EngineResult<T> {
        let mut tree = T::with_name(child.node_name());
        self.export_into(child, &mut tree, true)?;
        Ok(tree)
    }

    fn scalar_path<'b>(&self, binding: &'b FieldBinding) -> EngineResult<Vec<&'b str>> {
        segments(&binding.path, self.config.path_separator).map_err(|e| {
            EngineError::PathResolution(format!("field {}: {e}", binding.field_name))
        })
    }

    /// Attaches `children` at `path` below `tree`.
    ///
    /// Splits off the first segment; while a remainder exists, descends into
    /// (creating if needed) the intermediate node named by the head. The
    /// final segment names the attached children.
    fn attach<T: ConfigurationTree>(
        &self,
        tree: &mut T,
        path: &str,
        full_path: &str,
        children: Vec<T>,
    ) -> EngineResult<()> {
        let malformed = || EngineError::PathResolution(format!("malformed path {full_path:?}"));
        match split_head(path, self.config.path_separator) {
            (head, Some(rest)) => {
                if head.is_empty() || rest.is_empty() {
                    return Err(malformed());
                }
                trace!(segment = head, path = full_path, "Descending into intermediate node");
                self.attach(tree.child_or_insert(head), rest, full_path, children)
            }
            (head, None) => {
                if head.is_empty() {
                    return Err(malformed());
                }
                for mut child in children {
                    child.set_node_name(head);
                    tree.add_child(child);
                }
                Ok(())
            }
        }
    }
}
