//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors at once)
//!     → AnalyticsConfig (validated, immutable)
//!     → collector section feeds the sink, sampling section the selector
//!
//! At runtime:
//!     LogSelector::update swaps the sampling section atomically,
//!     so the rate can be retuned without tearing down the pipeline
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{AnalyticsConfig, CollectorConfig, SamplingConfig};
pub use validation::{validate_config, ValidationError};
