#![allow(dead_code)]

use cfgbind_model::{
    FieldBinding, KeyedCollection, MergeStrategy, NodeHeader, NodeSchema, Schema, SchemaRegistry,
};
use cfgbind_tree::ConfigTree;
use std::sync::OnceLock;

macro_rules! identity {
    () => {
        fn identity(&self) -> &NodeHeader {
            &self.header
        }

        fn identity_mut(&mut self) -> &mut NodeHeader {
            &mut self.header
        }
    };
}

/// `<manager name=".." x=".."/>`, keyed by name, merged field-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manager {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub x: Option<i64>,
}

impl NodeSchema for Manager {
    const TYPE_NAME: &'static str = "manager";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Manager>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar("x", |n| &n.x, |n| &mut n.x)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    identity!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}

/// `<setting name="..">text</setting>`: a keyed value wrapper.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setting {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub text: Option<String>,
}

impl NodeSchema for Setting {
    const TYPE_NAME: &'static str = "setting";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Setting>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .value(|n| &n.text, |n| &mut n.text)
                .build()
        })
    }

    identity!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}

/// `<tag label=".."/>`: no primary key, never deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub header: NodeHeader,
    pub label: Option<String>,
}

impl NodeSchema for Tag {
    const TYPE_NAME: &'static str = "tag";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Tag>()
                .scalar("label", |n| &n.label, |n| &mut n.label)
                .build()
        })
    }

    identity!();

    fn natural_key(&self) -> Option<String> {
        None
    }
}

/// Text of the service element itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Note {
    pub header: NodeHeader,
    pub text: Option<String>,
}

impl NodeSchema for Note {
    const TYPE_NAME: &'static str = "note";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Note>()
                .value(|n| &n.text, |n| &mut n.text)
                .build()
        })
    }

    identity!();
}

/// Nested node merged field-wise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pool {
    pub header: NodeHeader,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl NodeSchema for Pool {
    const TYPE_NAME: &'static str = "pool";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Pool>()
                .scalar("min", |n| &n.min, |n| &mut n.min)
                .scalar("max", |n| &n.max, |n| &mut n.max)
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    identity!();
}

/// Nested node replaced wholesale on merge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Endpoint {
    pub header: NodeHeader,
    pub host: Option<String>,
    pub port: Option<i64>,
}

impl NodeSchema for Endpoint {
    const TYPE_NAME: &'static str = "endpoint";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Endpoint>()
                .scalar("host", |n| &n.host, |n| &mut n.host)
                .scalar("port", |n| &n.port, |n| &mut n.port)
                .build()
        })
    }

    identity!();
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Service {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub enabled: Option<bool>,
    pub ratio: Option<f64>,
    pub weight: Option<f32>,
    pub retries: Option<i64>,
    pub note: Option<Note>,
    pub pool: Option<Pool>,
    pub endpoint: Option<Endpoint>,
    pub managers: KeyedCollection<Manager>,
    pub settings: KeyedCollection<Setting>,
    pub tags: KeyedCollection<Tag>,
}

impl NodeSchema for Service {
    const TYPE_NAME: &'static str = "service";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Service>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar("enabled", |n| &n.enabled, |n| &mut n.enabled)
                .scalar("ratio", |n| &n.ratio, |n| &mut n.ratio)
                .scalar("weight", |n| &n.weight, |n| &mut n.weight)
                .scalar_at("retries", "limits/retries", |n| &n.retries, |n| &mut n.retries)
                .node("note", |n| &n.note, |n| &mut n.note)
                .node("pool", |n| &n.pool, |n| &mut n.pool)
                .node_at("endpoint", "net/endpoint", |n| &n.endpoint, |n| &mut n.endpoint)
                .array_at("managers", "managers/manager", |n| &n.managers, |n| &mut n.managers)
                .array_at("settings", "settings/setting", |n| &n.settings, |n| &mut n.settings)
                .array_at("tags", "tag", |n| &n.tags, |n| &mut n.tags)
                .build()
        })
    }

    identity!();
}

/// Declares a field whose node type resolves to nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Broken {
    pub header: NodeHeader,
    pub name: Option<String>,
}

impl NodeSchema for Broken {
    const TYPE_NAME: &'static str = "broken";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Broken>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .declare(FieldBinding::new("widget", "widget"))
                .build()
        })
    }

    identity!();
}

/// Carries metadata for `unit` without an accessor for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gauge {
    pub header: NodeHeader,
    pub name: Option<String>,
}

impl NodeSchema for Gauge {
    const TYPE_NAME: &'static str = "gauge";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Gauge>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .declare(FieldBinding::new("unit", "string"))
                .build()
        })
    }

    identity!();
}

/// A collection path with an empty segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadPath {
    pub header: NodeHeader,
    pub tags: KeyedCollection<Tag>,
}

impl NodeSchema for BadPath {
    const TYPE_NAME: &'static str = "bad_path";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<BadPath>()
                .array_at("tags", "tags//tag", |n| &n.tags, |n| &mut n.tags)
                .build()
        })
    }

    identity!();
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with::<Service>()
        .with::<Broken>()
        .with::<BadPath>()
        .with::<Gauge>()
}

pub fn manager_tree(name: &str, x: i64) -> ConfigTree {
    ConfigTree::new("manager")
        .with_data("name", name)
        .with_data("x", x.to_string())
}

pub fn service_tree() -> ConfigTree {
    ConfigTree::new("service")
        .with_data("uuid", "svc-1")
        .with_data("name", "billing")
        .with_data("enabled", "true")
        .with_data("ratio", "0.75")
        .with_data("weight", "1.5")
        .with_value("primary billing service")
        .with_child(ConfigTree::new("limits").with_data("retries", "3"))
        .with_child(
            ConfigTree::new("pool")
                .with_data("uuid", "pool-1")
                .with_data("min", "1")
                .with_data("max", "8"),
        )
        .with_child(
            ConfigTree::new("net").with_child(
                ConfigTree::new("endpoint")
                    .with_data("host", "localhost")
                    .with_data("port", "8080"),
            ),
        )
        .with_child(
            ConfigTree::new("managers")
                .with_child(manager_tree("M1", 1).with_data("uuid", "m-1"))
                .with_child(manager_tree("M2", 2).with_data("uuid", "m-2")),
        )
        .with_child(
            ConfigTree::new("settings").with_child(
                ConfigTree::new("setting")
                    .with_data("uuid", "s-1")
                    .with_data("name", "mode")
                    .with_value("fast"),
            ),
        )
        .with_child(ConfigTree::new("tag").with_data("label", "a"))
        .with_child(ConfigTree::new("tag").with_data("label", "a"))
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
