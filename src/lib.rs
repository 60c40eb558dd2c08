//! vhostgen generates Apache reverse-proxy virtual hosts from a declarative
//! settings file and prints the certbot command needed to secure them.

/// Command-line interface module for the vhostgen application
pub mod cli;

/// Settings file loading and the starter file written on first run
pub mod config;

/// Paths, file names and module names shared across modules
pub mod constants;

/// Error types and handling for the vhostgen application
pub mod error;

/// Per-site merge, render and write orchestration
pub mod generator;

/// Certbot command hint
pub mod hint;

/// Logger setup
pub mod logger;

/// Overlay of site settings on the defaults
pub mod merger;

/// Advisory check of enabled Apache modules
pub mod preflight;

/// Virtual host templating
pub mod renderer;

/// Non-clobbering, atomic configuration file writes
pub mod writer;
