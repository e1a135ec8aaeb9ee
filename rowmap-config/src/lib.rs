//! Configuration management for row loading.
//!
//! Provides environment detection, configuration loading from YAML files and
//! environment variables, and the shared configuration types consumed by the
//! `rowmap` core.

mod environment;
mod load;
pub mod shared;

pub use environment::*;
pub use load::*;
