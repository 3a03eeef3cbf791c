//! Tests for log level functionality.

use fieldlog::{DynamicLeveler, Level, Leveler};
use std::sync::Arc;
use std::thread;

#[test]
fn level_ordering() {
    assert!(Level::All < Level::Debug);
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Err);
    assert!(Level::Err < Level::Fatal);
}

#[test]
fn level_display() {
    assert_eq!(Level::All.to_string(), "all");
    assert_eq!(Level::Debug.to_string(), "debug");
    assert_eq!(Level::Info.to_string(), "info");
    assert_eq!(Level::Warn.to_string(), "warn");
    assert_eq!(Level::Err.to_string(), "err");
    assert_eq!(Level::Fatal.to_string(), "fatal");
}

#[test]
fn parse_is_idempotent_on_canonical_names() {
    for level in Level::all() {
        assert_eq!(Level::parse(&level.to_string()), level);
    }
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!(Level::parse("DEBUG"), Level::Debug);
    assert_eq!(Level::parse("Info"), Level::Info);
    assert_eq!(Level::parse("FaTaL"), Level::Fatal);
}

#[test]
fn parse_accepts_prefixes() {
    assert_eq!(Level::parse("d"), Level::Debug);
    assert_eq!(Level::parse("inf"), Level::Info);
    assert_eq!(Level::parse("wa"), Level::Warn);
    assert_eq!(Level::parse("e"), Level::Err);
    assert_eq!(Level::parse("f"), Level::Fatal);
    assert_eq!(Level::parse("a"), Level::All);
}

#[test]
fn parse_unknown_is_permissive() {
    assert_eq!(Level::parse(""), Level::All);
    assert_eq!(Level::parse("verbose"), Level::All);
    assert_eq!(Level::parse("warning"), Level::All);
    assert_eq!(Level::parse("error"), Level::All);
}

#[test]
fn from_str_never_fails() {
    assert_eq!("warn".parse::<Level>(), Ok(Level::Warn));
    assert_eq!("nonsense".parse::<Level>(), Ok(Level::All));
}

#[test]
fn level_default() {
    assert_eq!(Level::default(), Level::Info);
}

#[test]
fn level_is_its_own_leveler() {
    assert_eq!(Level::Warn.level(), Level::Warn);
}

#[test]
fn threshold_filtering_grid() {
    for threshold in Level::all() {
        for record in Level::all() {
            let expected = threshold == Level::All || record >= threshold;
            assert_eq!(
                record.passes(threshold),
                expected,
                "record={record} threshold={threshold}"
            );
        }
    }
}

#[test]
fn dynamic_leveler_starts_at_initial() {
    assert_eq!(DynamicLeveler::new("warn").current(), Level::Warn);
    assert_eq!(DynamicLeveler::new("bogus").current(), Level::All);
    assert_eq!(DynamicLeveler::with_level(Level::Err).current(), Level::Err);
}

#[test]
fn dynamic_leveler_updates() {
    let leveler = DynamicLeveler::new("info");
    leveler.set_level("DEBUG");
    assert_eq!(leveler.current(), Level::Debug);
    leveler.set(Level::Fatal);
    assert_eq!(leveler.level(), Level::Fatal);
}

#[test]
fn dynamic_leveler_concurrent_readers_and_writers() {
    let leveler = Arc::new(DynamicLeveler::new("info"));
    let valid = Level::all();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let leveler = Arc::clone(&leveler);
            thread::spawn(move || {
                for n in 0..1000 {
                    if i % 2 == 0 {
                        leveler.set(Level::all()[(i + n) % 6]);
                    } else {
                        assert!(valid.contains(&leveler.current()));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(valid.contains(&leveler.current()));
}
