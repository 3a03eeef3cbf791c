//! One JSON object per line, for log pipelines that parse rather than grep.

use super::{Output, Record, Sink};
use crate::field::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Either one of the record's own text slots or a field value, borrowed.
#[derive(Serialize)]
#[serde(untagged)]
enum Entry<'a> {
    Text(&'a str),
    Value(&'a Value),
}

/// Writes each record as a JSON object with keys in sorted order. Duplicate keys
/// collapse to the value bound last.
#[derive(Debug, Clone)]
pub struct JsonOutput {
    sink: Sink,
}

impl JsonOutput {
    #[must_use]
    pub const fn new(sink: Sink) -> Self {
        Self { sink }
    }

    /// Renders without writing.
    ///
    /// # Errors
    /// Returns [`crate::Error::Format`] if serialization fails.
    pub fn format_record(record: &Record<'_>) -> Result<String, crate::Error> {
        let entry = create_entry(record);
        serde_json::to_string(&entry)
            .map_err(|e| crate::Error::Format(format!("JSON serialization failed: {e}")))
    }
}

/// Inserts in record order, so later keys overwrite earlier ones.
fn create_entry<'a>(record: &'a Record<'_>) -> BTreeMap<&'a str, Entry<'a>> {
    let mut entry = BTreeMap::new();

    entry.insert("ts", Entry::Text(&record.ts));
    if let Some(caller) = &record.caller {
        entry.insert("caller", Entry::Text(caller));
    }
    for field in record.bound {
        entry.insert(field.key.as_str(), Entry::Value(&field.value));
    }
    entry.insert("level", Entry::Text(record.level.as_str()));
    entry.insert("msg", Entry::Text(&record.msg));
    for field in record.fields {
        entry.insert(field.key.as_str(), Entry::Value(&field.value));
    }

    entry
}

impl Output for JsonOutput {
    fn write(&self, record: &Record<'_>) -> Result<(), crate::Error> {
        let json = Self::format_record(record)?;
        self.sink.write_line(&json)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.sink.flush()?;
        Ok(())
    }
}
