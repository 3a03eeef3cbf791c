//! Logger construction from a [`Config`] file.

use super::{Logger, LoggerBuilder};
use crate::config::Config;

impl LoggerBuilder {
    /// Builder preloaded with every option the config sets. Options the config leaves
    /// out keep the builder defaults, and further setters can still override.
    ///
    /// # Errors
    /// I/O errors from opening a file destination.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        let mut builder = Self::new()
            .destination(config.destination()?)
            .format(config.logger.format)
            .fields(config.static_fields())
            .caller(config.logger.caller)
            .caller_trim(config.logger.caller_trim.clone());

        if let Some(name) = &config.logger.name {
            builder = builder.name(name.clone());
        }
        if let Some(level) = config.logger.level {
            builder = builder.level(level);
        }

        Ok(builder)
    }
}

impl Logger {
    /// Logger built from the config at the default location.
    ///
    /// # Errors
    /// Config loading or destination errors.
    pub fn from_default_config() -> Result<Self, crate::Error> {
        Self::from_config(&Config::load()?)
    }

    /// # Errors
    /// I/O errors from opening a file destination.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        Ok(LoggerBuilder::from_config(config)?.build())
    }
}
