//! `fieldlog` - structured, leveled logging facade.
//!
//! - Leveled methods (`debug`, `info`, `warn`, `err`, `fatal`) with a threshold that
//!   can be fixed or changed at runtime through [`DynamicLeveler`]
//! - logfmt (default) or JSON records with static, bound and per-call fields
//! - Call-site `caller` field computed through `#[track_caller]`
//! - Hierarchical sub-loggers whose `src` is a dot-joined name path
//! - [`MultiError`] unwinding into indexed `error_NN` fields
//! - TOML configuration and a small CLI
//!
//! # Example
//!
//! ```
//! use fieldlog::{Format, Level, Logger};
//!
//! let logger = Logger::builder()
//!     .name("myapp")
//!     .level(Level::Info)
//!     .format(Format::Logfmt)
//!     .fields([("somekey", "someval")])
//!     .build();
//!
//! logger.info("some message", [("anotherkey", "another value")]);
//! // ts=2024-04-13T17:38:13.516398000Z caller=src/main.rs:11 somekey=someval src=myapp level=info msg="some message" anotherkey="another value"
//!
//! let json = Logger::builder().format(Format::Json).name("myapp").build();
//! json.info("some message", [("anotherkey", "another value")]);
//! // {"anotherkey":"another value","caller":"src/main.rs:14","level":"info","msg":"some message","src":"myapp","ts":"..."}
//!
//! Logger::default_logger().info("some message", ());
//! // ts=... caller=src/main.rs:17 src=default level=info msg="some message"
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `fieldlog` binary

pub mod caller;
pub mod config;
pub mod error;
pub mod field;
pub mod level;
pub mod logger;
pub mod message;
pub mod multi_error;
pub mod output;

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;

pub use config::Config;
pub use error::Error;
pub use field::{Field, Fields, Value};
pub use level::{DynamicLeveler, Level, Leveler};
pub use logger::{Logger, LoggerBuilder, ProcessExit, Terminator, TimeFormatter};
pub use message::Message;
pub use multi_error::{MultiError, WrappedErrors};
pub use output::{Capture, Destination, Format, JsonOutput, LogfmtOutput, Output, Record, Sink};
