//! Result and Error types for the crate.
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result containing an error variant from this module.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration loading error variants
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// The configuration file could not be read.
    #[error("Failed to read `{path}`")]
    #[diagnostic(code(robot_config::io))]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },

    /// The file is not valid toml, or does not match the configuration schema.
    #[error("Failed to parse `{path}`")]
    #[diagnostic(
        code(robot_config::deserialize),
        help("check the field names and types against the configuration struct")
    )]
    Deserialize {
        #[source]
        source: toml::de::Error,
        path: PathBuf,
    },
}
