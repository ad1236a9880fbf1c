//! Graph merger: layers an overlay graph onto a base graph.

use crate::{EngineError, EngineResult};
use cfgbind_model::{ConfigNode, FieldRef, FieldValue, KeyedCollection, MergeStrategy, NodeSchema};
use cfgbind_types::NodeId;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// Merges two graphs of the same node type.
///
/// The result starts as a copy of the base (keeping the base's identity)
/// and takes, field by field:
/// - scalars: the overlay's value when it is set;
/// - nested nodes: a recursive merge when the nested type uses
///   [`MergeStrategy::FieldWise`] and both sides are set, otherwise the
///   overlay's node when it is set;
/// - collections: base entries in base order, each merged with the overlay
///   entry of the same primary key, followed by overlay-only entries.
///
/// Neither input is modified.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphMerger;

impl GraphMerger {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Merges `overlay` onto `base`.
    pub fn merge(
        &self,
        base: &dyn ConfigNode,
        overlay: &dyn ConfigNode,
    ) -> EngineResult<Box<dyn ConfigNode>> {
        if base.type_name() != overlay.type_name() {
            return Err(EngineError::MergeMismatch {
                base: base.type_name().into(),
                overlay: overlay.type_name().into(),
            });
        }
        let schema = base.schema();
        debug!(
            node_type = schema.type_name(),
            base = %base.uuid(),
            overlay = %overlay.uuid(),
            "Merging node"
        );

        let mut merged = base.clone_node();
        let parent = merged.uuid().clone();

        if schema.is_value_wrapper() {
            if let Some(value) = schema.read_value(overlay)? {
                schema.write_value(merged.as_mut(), value)?;
            }
        }

        for binding in schema.bindings() {
            let field = binding.field_name.as_str();
            if schema.shape(field).is_none() {
                continue;
            }
            match schema.read(overlay, field)? {
                FieldRef::Scalar(None) | FieldRef::Node(None) => {}
                FieldRef::Scalar(Some(value)) => {
                    schema.write(merged.as_mut(), field, FieldValue::Scalar(value))?;
                }
                FieldRef::Node(Some(over)) => {
                    let replacement = match schema.read(base, field)? {
                        FieldRef::Node(Some(under))
                            if over.schema().merge_strategy() == MergeStrategy::FieldWise =>
                        {
                            self.merge(under, over)?
                        }
                        _ => adopt(over, &parent),
                    };
                    schema.write(merged.as_mut(), field, FieldValue::Node(replacement))?;
                }
                FieldRef::Collection(over) => {
                    let FieldRef::Collection(under) = schema.read(base, field)? else {
                        return Err(EngineError::MappingConfiguration(format!(
                            "field {field} of node {} is not a collection in the base",
                            schema.type_name()
                        )));
                    };
                    let items = self.merge_collection(under, over, &parent)?;
                    schema.write(merged.as_mut(), field, FieldValue::Collection(items))?;
                }
            }
        }
        Ok(merged)
    }

    /// Typed [`merge`](Self::merge).
    pub fn merge_as<N: NodeSchema>(&self, base: &N, overlay: &N) -> EngineResult<N> {
        let merged = self.merge(base, overlay)?;
        merged
            .into_any()
            .downcast::<N>()
            .map(|n| *n)
            .map_err(|_| EngineError::MergeMismatch {
                base: N::TYPE_NAME.into(),
                overlay: N::TYPE_NAME.into(),
            })
    }

    /// Folds each overlay onto the base in order.
    pub fn merge_layers(
        &self,
        base: &dyn ConfigNode,
        overlays: &[&dyn ConfigNode],
    ) -> EngineResult<Box<dyn ConfigNode>> {
        let mut merged = base.clone_node();
        for overlay in overlays {
            merged = self.merge(merged.as_ref(), *overlay)?;
        }
        Ok(merged)
    }

    fn merge_collection(
        &self,
        under: Vec<(Option<&str>, &dyn ConfigNode)>,
        over: Vec<(Option<&str>, &dyn ConfigNode)>,
        parent: &NodeId,
    ) -> EngineResult<KeyedCollection<Box<dyn ConfigNode>>> {
        let overlay_by_key: HashMap<&str, &dyn ConfigNode> = over
            .iter()
            .filter_map(|(key, node)| key.map(|k| (k, *node)))
            .collect();
        let base_keys: HashSet<&str> = under.iter().filter_map(|(key, _)| *key).collect();

        let mut items = KeyedCollection::new();
        for (key, node) in under {
            let item = match key.and_then(|k| overlay_by_key.get(k)) {
                Some(other) => self.merge(node, *other)?,
                None => node.clone_node(),
            };
            items.push(key.map(String::from), item);
        }
        for (key, node) in over {
            if key.is_some_and(|k| base_keys.contains(k)) {
                continue;
            }
            trace!(key = key.unwrap_or_default(), "Appending overlay entry");
            match key {
                Some(k) => {
                    items.insert_keyed(Some(k.to_string()), adopt(node, parent));
                }
                None => items.push(None, adopt(node, parent)),
            }
        }
        Ok(items)
    }
}

/// Copies an overlay node into the merged graph under `parent`.
fn adopt(node: &dyn ConfigNode, parent: &NodeId) -> Box<dyn ConfigNode> {
    let mut copy = node.clone_node();
    copy.header_mut().set_parent_uuid(Some(parent.clone()));
    copy
}
