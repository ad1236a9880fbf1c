//! Identity assignment during binding.

use cfgbind_model::NodeHeader;
use cfgbind_tree::ConfigurationTree;
use cfgbind_types::NodeId;

/// Assigns node identities.
///
/// A uuid supplied by the tree is used verbatim so identities survive an
/// export/bind round trip; otherwise a fresh UUID v4 is generated. Parent
/// links are set by the binder, never here.
#[derive(Debug, Clone)]
pub struct IdentityAssigner {
    uuid_key: String,
}

impl Default for IdentityAssigner {
    fn default() -> Self {
        Self::new("uuid")
    }
}

impl IdentityAssigner {
    #[must_use]
    pub fn new(uuid_key: &str) -> Self {
        Self {
            uuid_key: uuid_key.to_string(),
        }
    }

    /// The identity for a node bound from `tree`.
    #[must_use]
    pub fn identity_for<T: ConfigurationTree>(&self, tree: &T) -> NodeId {
        tree.data(&[self.uuid_key.as_str()])
            .map(NodeId::new)
            .unwrap_or_else(NodeId::generate)
    }

    /// Sets `header`'s uuid from `tree`.
    pub fn assign<T: ConfigurationTree>(&self, tree: &T, header: &mut NodeHeader) {
        header.set_uuid(self.identity_for(tree));
    }

    /// Gives `header` a fresh identity, ignoring the tree.
    pub fn assign_fresh(&self, header: &mut NodeHeader) {
        header.set_uuid(NodeId::generate());
    }
}
