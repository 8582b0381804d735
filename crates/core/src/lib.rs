pub mod config;
pub mod document;

pub use config::{Config, ConfigError};
pub use document::{ContentHint, Document};
