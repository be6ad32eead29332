//! Upmon binary crate: configuration loading for the CLI entry point.

pub mod config;

pub use config::{load_endpoints, ConfigError, EndpointConfig};
