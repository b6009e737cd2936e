//! fskit Core - Shared storage primitives, configuration, and error handling

pub mod config;
pub mod constants;
pub mod error;
pub mod storage;

pub use config::*;
pub use constants::*;
pub use error::{ConfigError, Error, Result};
pub use storage::*;
