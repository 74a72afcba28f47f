pub mod config;
pub mod error;
pub mod host;
pub mod logger;
pub mod registry;
pub mod runner;

// Re-export commonly used types
pub use error::{Result, RucheckError};
