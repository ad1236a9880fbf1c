//! Node-level conveniences over the engine.

use crate::{EngineConfig, EngineResult, GraphExporter, GraphMerger, ObjectGraphBinder};
use cfgbind_model::{NodeSchema, SchemaRegistry};
use cfgbind_tree::ConfigurationTree;

/// Tree conversion and merge methods available on every node type.
pub trait ConfigNodeExt: NodeSchema {
    /// Binds a new node of this type from `tree`.
    fn from_tree<T: ConfigurationTree>(tree: &T, registry: &SchemaRegistry) -> EngineResult<Self> {
        ObjectGraphBinder::new(registry).bind_as::<Self, T>(tree)
    }

    /// Replaces this node with one bound from `tree`.
    fn init_from_tree<T: ConfigurationTree>(
        &mut self,
        tree: &T,
        registry: &SchemaRegistry,
    ) -> EngineResult<()> {
        *self = Self::from_tree(tree, registry)?;
        Ok(())
    }

    /// Exports this node with the default engine config.
    fn export_to_tree<T: ConfigurationTree>(&self) -> EngineResult<T> {
        GraphExporter::new(EngineConfig::default()).export(self)
    }

    /// Layers `overlay` onto this node.
    fn merged_with(&self, overlay: &Self) -> EngineResult<Self> {
        GraphMerger::new().merge_as(self, overlay)
    }
}

impl<N: NodeSchema> ConfigNodeExt for N {}
