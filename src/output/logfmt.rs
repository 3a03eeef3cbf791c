//! `key=value` text lines, the default encoding.

use super::{Output, Record, Sink};
use crate::field::{Field, Value};
use std::fmt::Write as _;

/// Writes each record as one logfmt line.
#[derive(Debug, Clone)]
pub struct LogfmtOutput {
    sink: Sink,
}

impl LogfmtOutput {
    #[must_use]
    pub const fn new(sink: Sink) -> Self {
        Self { sink }
    }

    /// Renders without writing, in record field order.
    #[must_use]
    pub fn format_record(record: &Record<'_>) -> String {
        let mut line = String::with_capacity(128);

        push_text(&mut line, "ts", &record.ts);
        if let Some(caller) = &record.caller {
            push_text(&mut line, "caller", caller);
        }
        for field in record.bound {
            push_field(&mut line, field);
        }
        push_text(&mut line, "level", record.level.as_str());
        push_text(&mut line, "msg", &record.msg);
        for field in record.fields {
            push_field(&mut line, field);
        }

        line
    }
}

impl Output for LogfmtOutput {
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
        self.sink.write_line(&Self::format_record(record))?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.sink.flush()?;
        Ok(())
    }
}

fn push_field(line: &mut String, field: &Field) {
    match &field.value {
        Value::Str(s) => push_text(line, &field.key, s),
        other => {
            push_key(line, &field.key);
            let _ = write!(line, "{other}");
        }
    }
}

fn push_text(line: &mut String, key: &str, value: &str) {
    push_key(line, key);
    push_value(line, value);
}

fn push_key(line: &mut String, key: &str) {
    if !line.is_empty() {
        line.push(' ');
    }
    push_value(line, key);
    line.push('=');
}

fn push_value(line: &mut String, value: &str) {
    if !needs_quoting(value) {
        line.push_str(value);
        return;
    }

    line.push('"');
    for c in value.chars() {
        match c {
            '"' => line.push_str("\\\""),
            '\\' => line.push_str("\\\\"),
            '\n' => line.push_str("\\n"),
            '\r' => line.push_str("\\r"),
            '\t' => line.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(line, "\\u{{{:x}}}", u32::from(c));
            }
            c => line.push(c),
        }
    }
    line.push('"');
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '=' || c == '"' || c.is_control())
}
