//! Checks that Apache has the modules the generated virtual hosts need.
//! Purely advisory: nothing here can stop a run.

use crate::constants::REQUIRED_MODULES;
use crate::error::{Error, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::process::Command;

/// Source of the web server's enabled module names.
pub trait ModuleQuery {
    fn enabled_modules(&self) -> Result<HashSet<String>>;
}

/// Queries Apache through `apachectl -M`.
pub struct ApacheCtl {
    program: String,
}

impl ApacheCtl {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }
}

impl ModuleQuery for ApacheCtl {
    fn enabled_modules(&self) -> Result<HashSet<String>> {
        debug!("Running {} -M", self.program);
        let output = Command::new(&self.program)
            .arg("-M")
            .output()
            .map_err(|e| Error::PreflightError(format!("cannot run {}: {e}", self.program)))?;

        if !output.status.success() {
            return Err(Error::PreflightError(format!(
                "{} exited with status: {}",
                self.program, output.status
            )));
        }

        Ok(parse_module_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Extracts module names from `apachectl -M` output.
///
/// Lines look like ` rewrite_module (shared)`; the `Loaded Modules:` header
/// and anything else without a `(static)`/`(shared)` marker is ignored.
pub fn parse_module_list(output: &str) -> HashSet<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next()) {
                (Some(name), Some(kind)) if kind.starts_with('(') => Some(name.to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Returns the names in `required` that the web server does not report.
pub fn missing_modules(query: &dyn ModuleQuery, required: &[&str]) -> Result<Vec<String>> {
    let enabled = query.enabled_modules()?;
    debug!("Found {} enabled modules", enabled.len());
    Ok(required
        .iter()
        .filter(|module| !enabled.contains(**module))
        .map(|module| module.to_string())
        .collect())
}

/// Prints one warning per missing required module and returns the missing names.
/// A failing query only logs a warning.
pub fn check_modules(query: &dyn ModuleQuery) -> Vec<String> {
    match missing_modules(query, &REQUIRED_MODULES) {
        Ok(missing) => {
            for module in &missing {
                println!("WARNING: mod {module} doesn't seem to be activated");
            }
            missing
        }
        Err(e) => {
            warn!("Skipping module check: {e}");
            Vec::new()
        }
    }
}
