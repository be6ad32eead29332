//! Common utilities and types shared across Upmon components.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
