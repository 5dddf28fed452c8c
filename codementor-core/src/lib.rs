//! Code Mentor Core - Shared Data Model and Infrastructure
//!
//! This crate provides the pieces shared by the client and the terminal
//! interface:
//! - Request/response models for the analysis endpoint
//! - Configuration loading and defaults
//! - Logging initialization

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod logging;
pub mod models;

// Re-export commonly used types for convenience
pub use config::{MentorConfig, DEFAULT_ENDPOINT};
pub use models::{AnalysisRequest, AnalysisResponse, Language};

/// Result type used throughout Code Mentor core
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
