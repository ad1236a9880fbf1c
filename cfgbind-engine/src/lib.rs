//! Binding engine for cfgbind.
//!
//! Turns configuration trees into typed node graphs and back, and layers
//! graphs of the same type:
//! - [`ObjectGraphBinder`]: tree → graph, driven by each type's schema
//! - [`IdentityAssigner`]: uuid assignment during binding
//! - [`GraphExporter`]: graph → tree, the inverse of binding
//! - [`GraphMerger`]: base + overlay → merged graph
//! - [`GraphIndex`]: uuid / parent-link navigation over a bound graph
//!
//! All operations are synchronous in-memory walks. The only shared state is
//! the per-type schema cache in `cfgbind-model`, which is write-once.

mod binder;
mod config;
mod error;
mod exporter;
mod ext;
mod identity;
mod index;
mod merger;

pub use binder::ObjectGraphBinder;
pub use config::EngineConfig;
pub use error::{EngineError, EngineResult};
pub use exporter::GraphExporter;
pub use ext::ConfigNodeExt;
pub use identity::IdentityAssigner;
pub use index::GraphIndex;
pub use merger::GraphMerger;
