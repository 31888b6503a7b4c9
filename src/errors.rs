/*!
 * Error types for the scenaslice application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or querying the chapter-plan catalog
#[derive(Error, Debug)]
pub enum PlanError {
    /// Error when the catalog document does not match the expected schema
    #[error("Invalid chapter plan: {0}")]
    Schema(String),

    /// Error when the requested chapter id matches no catalog entry
    #[error("Unknown chapter '{requested}'. Available ids: {available}")]
    UnknownChapter {
        /// Chapter id (or start label) the caller asked for
        requested: String,
        /// Comma-separated list of every chapter id in the catalog
        available: String,
    },
}

/// Errors that can occur while resolving a chapter's line range
#[derive(Error, Debug)]
pub enum SliceError {
    /// Error when the chapter's start label is absent from the script
    #[error("Start label '*{0}' not found in script")]
    MissingStartLabel(String),

    /// Error when the chapter's end label is absent from the script
    #[error("End label '*{0}' not found in script")]
    MissingEndLabel(String),

    /// Error when the start label does not precede the end label
    #[error("Chapter '{chapter_id}' has start label after end label: {start_label} >= {end_label}")]
    InvalidRange {
        /// Id of the offending chapter definition
        chapter_id: String,
        /// Start label that resolved too late
        start_label: String,
        /// End label that resolved too early
        end_label: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error when the catalog file is absent
    #[error("Chapter plan not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Error when the scenario script file is absent
    #[error("Script file not found: {0}")]
    ScriptNotFound(PathBuf),

    /// Error from the chapter-plan catalog
    #[error("Plan error: {0}")]
    Plan(#[from] PlanError),

    /// Error from chapter slicing
    #[error("Slice error: {0}")]
    Slice(#[from] SliceError),

    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
