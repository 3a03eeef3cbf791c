//! TOML configuration: where a logger writes, how it encodes records, and which
//! static fields it binds.
//!
//! ```toml
//! [logger]
//! name = "myapp"
//! level = "info"
//! format = "json"
//! destination = "~/.local/state/myapp/app.log"
//! caller = true
//!
//! [fields]
//! region = "eu-west-1"
//! shard = 3
//! ```

mod structs;

pub use structs::LoggerConfig;

use crate::field::{Fields, Value};
use crate::output::Destination;
use serde::Deserialize;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// An empty file is a valid config; every field has a default.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    /// Static fields, bound in the order they appear in the file.
    pub fields: toml::Table,
}

impl Config {
    /// Loads from the platform config directory (`~/.config/fieldlog/config.toml` on
    /// Linux). A missing file yields the defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read, or
    /// it isn't valid TOML.
    pub fn load() -> Result<Self, crate::Error> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads from an explicit path. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// # Errors
    /// Returns [`crate::Error::ConfigParse`] on invalid TOML or mistyped fields.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// # Errors
    /// Fails when the platform has no config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::ProjectDirs::from("", "", "fieldlog")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// `[fields]` converted to typed fields. Arrays, tables and datetimes are bound
    /// as their TOML text.
    #[must_use]
    pub fn static_fields(&self) -> Fields {
        let mut fields = Fields::new();
        for (key, value) in &self.fields {
            let value = match value {
                toml::Value::String(s) => Value::Str(s.clone()),
                toml::Value::Integer(n) => Value::Int(*n),
                toml::Value::Float(n) => Value::Float(*n),
                toml::Value::Boolean(b) => Value::Bool(*b),
                other => Value::Str(other.to_string()),
            };
            fields.push(key.clone(), value);
        }
        fields
    }

    /// Opens the configured destination. File destinations are opened for append,
    /// creating missing parent directories.
    ///
    /// # Errors
    /// I/O errors from creating directories or opening the file.
    pub fn destination(&self) -> Result<Destination, crate::Error> {
        let destination = self.logger.destination.trim();
        match destination.to_lowercase().as_str() {
            "" | "stdout" => return Ok(Destination::Stdout),
            "stderr" => return Ok(Destination::Stderr),
            "discard" => return Ok(Destination::Discard),
            _ => {}
        }

        let expanded = shellexpand::tilde(destination);
        let path = Path::new(expanded.as_ref());
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Destination::writer(file))
    }
}
