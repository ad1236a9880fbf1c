//! Logger configuration.

use cfgbind_model::{KeyedCollection, MergeStrategy, NodeHeader, NodeSchema, Schema};
use std::sync::OnceLock;

/// `<logger name=".." type=".."><params><param ../></params></logger>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Logger {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub params: KeyedCollection<Param>,
}

impl Logger {
    /// The parameter named `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.get(name)
    }

    /// The text of the parameter named `name`.
    #[must_use]
    pub fn param_value(&self, name: &str) -> Option<&str> {
        self.param(name)?.value()
    }
}

impl NodeSchema for Logger {
    const TYPE_NAME: &'static str = "logger";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Logger>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar_at("kind", "type", |n| &n.kind, |n| &mut n.kind)
                .array_at("params", "params/param", |n| &n.params, |n| &mut n.params)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}

/// A named, typed parameter whose value is the element text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Param {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub kind: Option<String>,
    pub value: Option<ParamValue>,
}

impl Param {
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_ref()?.text.as_deref()
    }
}

impl NodeSchema for Param {
    const TYPE_NAME: &'static str = "param";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Param>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar_at("kind", "type", |n| &n.kind, |n| &mut n.kind)
                .node("value", |n| &n.value, |n| &mut n.value)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}

/// Element text of a [`Param`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamValue {
    pub header: NodeHeader,
    pub text: Option<String>,
}

impl NodeSchema for ParamValue {
    const TYPE_NAME: &'static str = "param_value";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<ParamValue>()
                .value(|n| &n.text, |n| &mut n.text)
                .build()
        })
    }

    node_header!();
}
