//! Configuration loading and management for the HR engine.
//!
//! This module loads deployment metadata and the depreciation schedules
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hr_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, EngineMetadata};
