//! Tests for JSON record output.

use chrono::{Datelike, Utc};
use fieldlog::{Capture, Format, Level, Logger, MultiError, fields};
use serde_json::{Map, Value};

fn json_logger() -> (Logger, Capture) {
    let capture = Capture::new();
    let logger = Logger::builder()
        .destination(capture.clone())
        .name("somelogger")
        .level(Level::Info)
        .format(Format::Json)
        .fields([("key1", "value1")])
        .build();
    (logger, capture)
}

fn records(capture: &Capture) -> Vec<Map<String, Value>> {
    capture
        .lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON object"))
        .collect()
}

#[test]
fn logger_json() {
    let (logger, capture) = json_logger();

    logger.info("foo", [("key2", "value2")]);

    let data = &records(&capture)[0];
    assert_eq!(data["key1"], "value1");
    assert_eq!(data["key2"], "value2");
    assert!(data["caller"].as_str().unwrap().contains("json_output.rs:"));
    assert!(
        data["ts"]
            .as_str()
            .unwrap()
            .starts_with(&Utc::now().year().to_string())
    );
    assert_eq!(data["src"], "somelogger");
    assert_eq!(data["level"], "info");
    assert_eq!(data["msg"], "foo");
}

#[test]
fn json_matches_logfmt_field_set() {
    let (json, json_capture) = json_logger();
    let logfmt_capture = Capture::new();
    let logfmt = Logger::builder()
        .destination(logfmt_capture.clone())
        .name("somelogger")
        .fields([("key1", "value1")])
        .caller(false)
        .build();
    let json = json.with_fields(()).child("sub");
    let logfmt = logfmt.child("sub");

    json.warn("same", [("n", "1")]);
    logfmt.warn("same", [("n", "1")]);

    let data = &records(&json_capture)[0];
    let line = logfmt_capture.contents();
    for (key, value) in [
        ("key1", "value1"),
        ("src", "somelogger.sub"),
        ("level", "warn"),
        ("msg", "same"),
        ("n", "1"),
    ] {
        assert_eq!(data[key], value);
        assert!(line.contains(&format!("{key}={value}")), "{line}");
    }
}

#[test]
fn one_object_per_line() {
    let (logger, capture) = json_logger();

    logger.info("first", ());
    logger.warn("second line\nwith newline", ());

    let parsed = records(&capture);
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[1]["msg"], "second line\nwith newline");
}

#[test]
fn keys_are_sorted() {
    let (logger, capture) = json_logger();

    logger.info("sorted", [("zeta", "z"), ("alpha", "a")]);

    let line = capture.contents();
    let keys: Vec<usize> = ["alpha", "caller", "key1", "level", "msg", "src", "ts", "zeta"]
        .iter()
        .map(|key| line.find(&format!("\"{key}\":")).unwrap())
        .collect();
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn values_keep_json_types() {
    let (logger, capture) = json_logger();

    logger.info(
        "typed",
        fields! { "count" => 3, "neg" => -2, "ratio" => 0.25, "ok" => false },
    );

    let data = &records(&capture)[0];
    assert_eq!(data["count"], 3);
    assert_eq!(data["neg"], -2);
    assert_eq!(data["ratio"], 0.25);
    assert_eq!(data["ok"], false);
}

#[test]
fn duplicate_keys_keep_last_value() {
    let (logger, capture) = json_logger();

    logger
        .with_fields([("key1", "bound-override")])
        .info("dup", [("key1", "call-override")]);

    let data = &records(&capture)[0];
    assert_eq!(data["key1"], "call-override");
}

#[test]
fn multi_error_fields() {
    let (logger, capture) = json_logger();

    let err = MultiError::new().append("some err1").append("some err2");
    logger.log_error("some error", &err, ());

    let data = &records(&capture)[0];
    assert_eq!(data["error_00"], "some err1");
    assert_eq!(data["error_01"], "some err2");
    assert!(!data.contains_key("error"));
    assert_eq!(data["level"], "err");
}

#[test]
fn caller_absent_when_disabled() {
    let capture = Capture::new();
    let logger = Logger::builder()
        .destination(capture.clone())
        .format(Format::parse("JSON"))
        .caller(false)
        .build();

    logger.info("x", ());

    assert!(!records(&capture)[0].contains_key("caller"));
}
