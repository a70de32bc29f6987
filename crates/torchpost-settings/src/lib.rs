//! torchpost Settings Crate
//!
//! Handles the post-processor configuration: the recognized options,
//! loading them from JSON or TOML files, and validating them.

pub mod config;
pub mod error;

pub use config::{MeasurementSystem, PostConfig, TorchControl, WordSeparator, SEQUENCE_CEILING};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
