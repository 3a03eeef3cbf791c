//! Tests for config file loading and config-built loggers.

use fieldlog::{Config, Error, Format, Level, Logger, LoggerBuilder, Value};
use std::fs;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.logger.name, None);
    assert_eq!(config.logger.format, Format::Logfmt);
    assert_eq!(config.logger.destination, "stdout");
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logger\nname = ").unwrap();

    assert!(matches!(Config::load_from(&path), Err(Error::ConfigParse(_))));
}

#[test]
fn mistyped_field_is_a_parse_error() {
    assert!(matches!(
        Config::parse("[logger]\ncaller = \"yes\""),
        Err(Error::ConfigParse(_))
    ));
}

#[test]
fn full_config_round_trip() {
    let config = Config::parse(
        r#"
[logger]
name = "svc"
level = "debug"
format = "json"
destination = "discard"
caller = false
caller_trim = "/build"

[fields]
region = "eu"
shard = 7
"#,
    )
    .unwrap();

    assert_eq!(config.logger.name.as_deref(), Some("svc"));
    assert_eq!(config.logger.level, Some(Level::Debug));
    assert_eq!(config.logger.format, Format::Json);
    assert!(!config.logger.caller);
    assert_eq!(config.logger.caller_trim, "/build");

    let fields = config.static_fields();
    assert_eq!(fields.get("region"), Some(&Value::from("eu")));
    assert_eq!(fields.get("shard"), Some(&Value::Int(7)));
}

#[test]
fn file_destination_appends_records() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("nested").join("app.log");
    let config = Config::parse(&format!(
        "[logger]\nname = \"svc\"\ncaller = false\ndestination = \"{}\"\n\n[fields]\nregion = \"eu\"\n",
        log_path.display()
    ))
    .unwrap();

    let logger = Logger::from_config(&config).unwrap();
    logger.info("first", ());
    logger.warn("second", [("n", 2)]);
    logger.flush().unwrap();

    let logger = Logger::from_config(&config).unwrap();
    logger.info("third", ());
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("region=eu src=svc level=info msg=first"));
    assert!(lines[1].ends_with("level=warn msg=second n=2"));
    assert!(lines[2].contains("msg=third"));
}

#[test]
fn builder_setters_override_config() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("app.log");
    let config = Config::parse(&format!(
        "[logger]\nname = \"svc\"\nlevel = \"err\"\ncaller = false\ndestination = \"{}\"\n",
        log_path.display()
    ))
    .unwrap();

    let logger = LoggerBuilder::from_config(&config)
        .unwrap()
        .level(Level::Debug)
        .name("override")
        .build();
    logger.debug("visible", ());
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(content.contains("src=override level=debug msg=visible"));
}

#[test]
fn config_level_filters_records() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("app.log");
    let config = Config::parse(&format!(
        "[logger]\nlevel = \"warn\"\ndestination = \"{}\"\n",
        log_path.display()
    ))
    .unwrap();

    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.min_level(), Some(Level::Warn));
    logger.info("hidden", ());
    logger.err("shown", ());
    logger.flush().unwrap();

    let content = fs::read_to_string(&log_path).unwrap();
    assert!(!content.contains("hidden"));
    assert!(content.contains("msg=shown"));
}

#[test]
fn standard_stream_destinations() {
    for name in ["stdout", "STDERR", "discard", ""] {
        let config = Config::parse(&format!("[logger]\ndestination = \"{name}\"")).unwrap();
        assert!(config.destination().is_ok(), "{name}");
    }
}
