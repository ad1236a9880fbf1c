//! Schema model for cfgbind.
//!
//! Defines the contract between concrete configuration node types and the
//! generic binding engine:
//! - [`FieldBinding`]: how one field maps onto a path in a configuration tree
//! - [`ConfigNode`] / [`NodeSchema`]: the object-safe node interface and the
//!   per-type declaration that every concrete node implements
//! - [`Schema`]: a type's binding table plus its field-name → accessor
//!   dispatch table, built once per process
//! - [`KeyedCollection`]: the backing container of collection fields
//! - [`SchemaRegistry`]: resolves type names and field metadata
//! - [`MergeStrategy`]: how a nested node is layered during merge
//!
//! No reflection is involved: each type declares its schema explicitly
//! through [`SchemaBuilder`].

mod binding;
mod collection;
mod error;
mod node;
mod registry;
mod schema;

pub use binding::{ARRAY_TYPE, FieldBinding, NodeType};
pub use collection::KeyedCollection;
pub use error::{ModelError, ModelResult};
pub use node::{ConfigNode, NodeHeader, NodeSchema};
pub use registry::SchemaRegistry;
pub use schema::{FieldRef, FieldShape, FieldValue, MergeStrategy, Schema, SchemaBuilder};
