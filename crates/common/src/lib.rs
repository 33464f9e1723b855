//! nsclean Common Utilities
//!
//! Shared infrastructure for all nsclean crates:
//! - Error types and result aliases
//! - Suppression aggressiveness levels
//! - Run timing
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod level;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use level::*;
