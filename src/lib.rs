pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{Config, ConfigStore};
pub use domain::errors::{ConfigError, ParseError, PersistError, ValidationError};
