//! Concrete node types bound by the cfgbind engine.
//!
//! Each type declares its schema once, through [`NodeSchema`], and is
//! otherwise plain data. [`registry`] holds every type here, ready to hand
//! to the binder.

use cfgbind_model::SchemaRegistry;
use std::sync::OnceLock;

/// Implements the header accessors of [`NodeSchema`] for a struct with a
/// `header: NodeHeader` field.
macro_rules! node_header {
    () => {
        fn identity(&self) -> &cfgbind_model::NodeHeader {
            &self.header
        }

        fn identity_mut(&mut self) -> &mut cfgbind_model::NodeHeader {
            &mut self.header
        }
    };
}

mod logger;
mod scheduler;
mod server;

pub use cfgbind_model::NodeSchema;
pub use logger::{Logger, Param, ParamValue};
pub use scheduler::{Job, Scheduler};
pub use server::{Datasource, Manager, Server};

/// The registry of every node type in this crate.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        SchemaRegistry::new()
            .with::<Server>()
            .with::<Logger>()
            .with::<Scheduler>()
    })
}
