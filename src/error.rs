//! Error handling for vhostgen.
//! Defines the error type and result alias used throughout the application.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating virtual host configurations.
///
/// Fatal errors (`ConfigParseError`, `DirectoryMissing`, `IoError` outside the
/// per-site loop) stop the run before anything is written. `MissingRequiredField`,
/// `InvalidSite` and `TemplateError` only affect the site they were raised for.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The settings file is not well-formed
    #[error("Configuration error: {0}.")]
    ConfigParseError(String),

    /// The virtual host output directory does not exist
    #[error("Output directory '{}' does not exist.", path.display())]
    DirectoryMissing { path: PathBuf },

    /// A site lacks a field that has no usable default
    #[error("Site '{site}' is missing required field '{field}'.")]
    MissingRequiredField { site: String, field: &'static str },

    /// A site entry cannot be used: bad name, wrong shape or a badly typed field
    #[error("Site '{site}' is invalid: {reason}.")]
    InvalidSite { site: String, reason: String },

    /// Represents errors that occur during template rendering
    #[error("Template error: {0}.")]
    TemplateError(#[from] minijinja::Error),

    /// The web server could not be queried for its modules
    #[error("Preflight error: {0}.")]
    PreflightError(String),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
