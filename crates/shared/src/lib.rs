//! Shared library for the content feed workspace.
//!
//! This crate provides common functionality used by the feed crates:
//! - Configuration management
//! - Catalog and card models
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types
pub use config::{CatalogConfig, Config};
pub use logging::LogConfig;
pub use models::*;

/// Common result type using anyhow::Error
pub type Result<T> = anyhow::Result<T>;
