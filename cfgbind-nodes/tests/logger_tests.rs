use cfgbind_engine::{ConfigNodeExt, EngineError, ObjectGraphBinder};
use cfgbind_model::ConfigNode;
use cfgbind_nodes::{Logger, Param, registry};
use cfgbind_tree::{ConfigTree, ConfigurationTree};
use pretty_assertions::assert_eq;

/// `<logger name="A" type="Foo"><params><param name="level" type="string">DEBUG</param></params></logger>`
fn logger_tree() -> ConfigTree {
    ConfigTree::new("logger")
        .with_data("name", "A")
        .with_data("type", "Foo")
        .with_child(
            ConfigTree::new("params").with_child(
                ConfigTree::new("param")
                    .with_data("name", "level")
                    .with_data("type", "string")
                    .with_value("DEBUG"),
            ),
        )
}

fn param(name: &str, value: &str) -> ConfigTree {
    ConfigTree::new("param")
        .with_data("name", name)
        .with_value(value)
}

// ── Binding ──────────────────────────────────────────────────────

#[test]
fn binds_logger_with_params() {
    let logger = Logger::from_tree(&logger_tree(), registry()).unwrap();
    assert_eq!(logger.name.as_deref(), Some("A"));
    assert_eq!(logger.kind.as_deref(), Some("Foo"));
    assert_eq!(logger.params.len(), 1);

    let level = logger.param("level").unwrap();
    assert_eq!(level.kind.as_deref(), Some("string"));
    assert_eq!(level.value(), Some("DEBUG"));
    assert_eq!(logger.param_value("level"), Some("DEBUG"));
}

#[test]
fn param_links_to_logger() {
    let logger = Logger::from_tree(&logger_tree(), registry()).unwrap();
    let level = logger.param("level").unwrap();
    assert_eq!(level.parent_uuid(), Some(logger.uuid()));
    assert_eq!(level.node_name(), "param");

    let value = level.value.as_ref().unwrap();
    assert_eq!(value.parent_uuid(), Some(level.uuid()));
    assert_ne!(value.uuid(), level.uuid());
}

#[test]
fn missing_param_is_none() {
    let logger = Logger::from_tree(&logger_tree(), registry()).unwrap();
    assert!(logger.param("verbosity").is_none());
    assert_eq!(logger.param_value("verbosity"), None);
}

#[test]
fn param_without_text_has_no_value() {
    let tree = ConfigTree::new("logger").with_child(
        ConfigTree::new("params").with_child(ConfigTree::new("param").with_data("name", "flag")),
    );
    let logger = Logger::from_tree(&tree, registry()).unwrap();
    let flag = logger.param("flag").unwrap();
    assert!(flag.value.is_none());
}

#[test]
fn repeated_param_keeps_last() {
    let tree = ConfigTree::new("logger").with_child(
        ConfigTree::new("params")
            .with_child(param("level", "DEBUG"))
            .with_child(param("file", "out.log"))
            .with_child(param("level", "WARN")),
    );
    let logger = Logger::from_tree(&tree, registry()).unwrap();
    let keys: Vec<_> = logger.params.keys().collect();
    assert_eq!(keys, vec!["level", "file"]);
    assert_eq!(logger.param_value("level"), Some("WARN"));
}

#[test]
fn bind_by_type_name() {
    let node = ObjectGraphBinder::new(registry())
        .bind(&logger_tree(), "logger")
        .unwrap();
    assert_eq!(node.primary_key(), Some("A".to_string()));
    assert!(node.downcast_ref::<Logger>().is_some());
    assert!(node.downcast_ref::<Param>().is_none());
}

#[test]
fn unregistered_type_is_rejected() {
    let err = ObjectGraphBinder::new(registry())
        .bind(&logger_tree(), "appender")
        .unwrap_err();
    assert!(matches!(err, EngineError::MappingConfiguration(_)));
}

// ── Export ───────────────────────────────────────────────────────

#[test]
fn exports_logger_layout() {
    let logger = Logger::from_tree(&logger_tree(), registry()).unwrap();
    let tree: ConfigTree = logger.export_to_tree().unwrap();
    assert_eq!(tree.node_name(), "logger");
    assert_eq!(tree.attribute("type"), Some("Foo"));
    let param = tree.child(&["params", "param"]).unwrap();
    assert_eq!(param.attribute("name"), Some("level"));
    assert_eq!(param.attribute("type"), Some("string"));
    assert_eq!(param.value(), Some("DEBUG"));
}

#[test]
fn export_round_trip_keeps_identity() {
    let logger = Logger::from_tree(&logger_tree(), registry()).unwrap();
    let tree: ConfigTree = logger.export_to_tree().unwrap();
    let again = Logger::from_tree(&tree, registry()).unwrap();
    assert_eq!(again.uuid(), logger.uuid());
    assert_eq!(again.param("level").unwrap().uuid(), logger.param("level").unwrap().uuid());
    assert_eq!(again.param_value("level"), Some("DEBUG"));
}

// ── Merge ────────────────────────────────────────────────────────

#[test]
fn overlay_param_value_wins() {
    let base = Logger::from_tree(&logger_tree(), registry()).unwrap();
    let overlay_tree = ConfigTree::new("logger").with_data("name", "A").with_child(
        ConfigTree::new("params")
            .with_child(param("level", "TRACE"))
            .with_child(param("file", "app.log")),
    );
    let overlay = Logger::from_tree(&overlay_tree, registry()).unwrap();
    let merged = base.merged_with(&overlay).unwrap();

    assert_eq!(merged.kind.as_deref(), Some("Foo"));
    assert_eq!(merged.param_value("level"), Some("TRACE"));
    assert_eq!(merged.param("level").unwrap().kind.as_deref(), Some("string"));
    assert_eq!(merged.param_value("file"), Some("app.log"));
}
