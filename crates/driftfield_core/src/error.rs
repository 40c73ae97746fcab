//! # Field Error Types
//!
//! The simulation itself cannot fail; only loading and validating its
//! configuration can.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring the particle field.
#[derive(Error, Debug)]
pub enum FieldError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("cannot read configuration file {path}: {source}")]
    ConfigIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("cannot parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;
