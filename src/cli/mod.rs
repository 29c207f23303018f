//! CLI support for sceneq
//!
//! Provides programmatic access to sceneq CLI functionality for embedding
//! in other tools.

mod inspect;
mod run;

pub use inspect::{execute_inspect, InspectOptions, InspectResult};
pub use run::{execute_run, RunOptions};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Scene document failed to load
    Scene(crate::SceneError),
    /// Query execution error
    Query(crate::QueryError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No scene document provided
    NoScene,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Scene(e) => write!(f, "Scene error: {}", e),
            CliError::Query(e) => write!(f, "Query error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoScene => {
                write!(f, "No scene provided. Use --scene or pipe a scene document to stdin.")
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Scene(e) => Some(e),
            CliError::Query(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            CliError::NoScene => None,
        }
    }
}

impl From<crate::SceneError> for CliError {
    fn from(e: crate::SceneError) -> Self {
        CliError::Scene(e)
    }
}

impl From<crate::QueryError> for CliError {
    fn from(e: crate::QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
