//! Writes rendered virtual hosts to the output directory.
//! A file that already exists belongs to the operator and is never replaced.

use crate::constants::CONF_EXTENSION;
use crate::error::{Error, Result};
use crate::merger::check_site_name;
use log::debug;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// What happened to a site's configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    SkippedExisting(PathBuf),
}

impl fmt::Display for WriteOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteOutcome::Written(path) => write!(f, "Writing config {}", path.display()),
            WriteOutcome::SkippedExisting(path) => {
                write!(f, "Not replacing existing config {}. Delete it to update", path.display())
            }
        }
    }
}

/// Checks that the output directory exists and returns its absolute path.
///
/// # Errors
/// * `Error::DirectoryMissing` if `output_dir` is not an existing directory
pub fn ensure_output_dir<P: AsRef<Path>>(output_dir: P) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if !output_dir.is_dir() {
        return Err(Error::DirectoryMissing { path: output_dir.to_path_buf() });
    }
    Ok(output_dir.canonicalize()?)
}

/// Path of a site's file: `<output_dir>/<lowercase(trim(site))>.conf`.
pub fn target_path<P: AsRef<Path>>(output_dir: P, site: &str) -> PathBuf {
    let stem = site.trim().to_lowercase();
    output_dir.as_ref().join(format!("{stem}.{CONF_EXTENSION}"))
}

/// Writes a site's configuration unless its file already exists.
///
/// The content goes to a temporary file in the same directory first and is
/// then moved into place without clobbering, so a crash never leaves a
/// half-written file behind. The file is readable by group and others,
/// like a file Apache tooling would create.
///
/// # Errors
/// * `Error::InvalidSite` if `site` would escape `output_dir`
/// * `Error::DirectoryMissing` if `output_dir` does not exist
/// * `Error::IoError` if the temporary file cannot be created or persisted
pub fn write_site_config<P: AsRef<Path>>(
    output_dir: P,
    site: &str,
    content: &str,
) -> Result<WriteOutcome> {
    check_site_name(site)?;
    let output_dir = ensure_output_dir(output_dir)?;
    let path = target_path(&output_dir, site);
    if path.exists() {
        return Ok(WriteOutcome::SkippedExisting(path));
    }

    let mut tmp = conf_temp_file(&output_dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.as_file().sync_all()?;

    match tmp.persist_noclobber(&path) {
        Ok(_) => {
            debug!("Persisted {}", path.display());
            Ok(WriteOutcome::Written(path))
        }
        // Someone created the file since the existence check.
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            Ok(WriteOutcome::SkippedExisting(path))
        }
        Err(e) => Err(Error::IoError(e.error)),
    }
}

fn conf_temp_file(output_dir: &Path) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    // tempfile defaults to 0600, which hides the config from non-root readers.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(crate::constants::CONF_FILE_MODE));
    }
    builder.tempfile_in(output_dir)
}
