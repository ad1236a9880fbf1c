//! Server configuration and the entities it owns.

use crate::{Logger, Param, Scheduler};
use cfgbind_model::{KeyedCollection, MergeStrategy, NodeHeader, NodeSchema, Schema};
use std::sync::OnceLock;

/// Root of a server configuration.
///
/// Keyed by its uuid; a process runs one server per configuration source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Server {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub port: Option<i64>,
    pub description: Option<String>,
    pub scheduler: Option<Scheduler>,
    pub managers: KeyedCollection<Manager>,
    pub loggers: KeyedCollection<Logger>,
    pub datasources: KeyedCollection<Datasource>,
}

impl Server {
    #[must_use]
    pub fn manager(&self, name: &str) -> Option<&Manager> {
        self.managers.get(name)
    }

    #[must_use]
    pub fn logger(&self, name: &str) -> Option<&Logger> {
        self.loggers.get(name)
    }

    #[must_use]
    pub fn datasource(&self, name: &str) -> Option<&Datasource> {
        self.datasources.get(name)
    }
}

impl NodeSchema for Server {
    const TYPE_NAME: &'static str = "server";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Server>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar("port", |n| &n.port, |n| &mut n.port)
                .scalar("description", |n| &n.description, |n| &mut n.description)
                .node("scheduler", |n| &n.scheduler, |n| &mut n.scheduler)
                .array_at("managers", "managers/manager", |n| &n.managers, |n| &mut n.managers)
                .array_at("loggers", "loggers/logger", |n| &n.loggers, |n| &mut n.loggers)
                .array_at(
                    "datasources",
                    "datasources/datasource",
                    |n| &n.datasources,
                    |n| &mut n.datasources,
                )
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();
}

/// A named service manager and its tuning parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manager {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub class_name: Option<String>,
    pub params: KeyedCollection<Param>,
}

impl NodeSchema for Manager {
    const TYPE_NAME: &'static str = "manager";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Manager>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar_at("class_name", "class", |n| &n.class_name, |n| &mut n.class_name)
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

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Datasource {
    pub header: NodeHeader,
    pub name: Option<String>,
    pub url: Option<String>,
    pub user: Option<String>,
    pub max_connections: Option<i64>,
    pub properties: KeyedCollection<Param>,
}

impl Datasource {
    /// The text of the connection property named `name`.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)?.value()
    }
}

impl NodeSchema for Datasource {
    const TYPE_NAME: &'static str = "datasource";

    fn node_schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        Schema::cached(&SCHEMA, || {
            Schema::builder::<Datasource>()
                .scalar("name", |n| &n.name, |n| &mut n.name)
                .scalar("url", |n| &n.url, |n| &mut n.url)
                .scalar("user", |n| &n.user, |n| &mut n.user)
                .scalar_at(
                    "max_connections",
                    "pool/max",
                    |n| &n.max_connections,
                    |n| &mut n.max_connections,
                )
                .array_at(
                    "properties",
                    "properties/property",
                    |n| &n.properties,
                    |n| &mut n.properties,
                )
                .merge_strategy(MergeStrategy::FieldWise)
                .build()
        })
    }

    node_header!();

    fn natural_key(&self) -> Option<String> {
        self.name.clone()
    }
}
