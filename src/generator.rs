//! Runs merge, render and write for every declared site.
//! Each site is handled on its own: a failure is reported and the batch
//! moves on to the next site.

use crate::config::SiteConfig;
use crate::error::{Error, Result};
use crate::merger::{merge_all, ResolvedSite};
use crate::renderer::VHostRenderer;
use crate::writer::{ensure_output_dir, write_site_config, WriteOutcome};
use log::debug;
use std::path::Path;

/// Outcome of one site.
#[derive(Debug)]
pub struct SiteOutcome {
    pub name: String,
    pub result: Result<(ResolvedSite, WriteOutcome)>,
}

/// Everything a generation run produced.
#[derive(Debug, Default)]
pub struct Report {
    pub sites: Vec<SiteOutcome>,
}

impl Report {
    /// Domains of the sites that rendered, whether written or skipped as existing.
    pub fn certificate_domains(&self) -> Vec<String> {
        self.sites
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .map(|(site, _)| site.fqdn())
            .collect()
    }

    /// Number of sites that failed to merge, render or write.
    pub fn failures(&self) -> usize {
        self.sites.iter().filter(|outcome| outcome.result.is_err()).count()
    }
}

fn process_site(
    renderer: &dyn VHostRenderer,
    output_dir: &Path,
    site: Result<ResolvedSite>,
) -> Result<(ResolvedSite, WriteOutcome)> {
    let site = site?;
    let content = renderer.render(&site)?;
    let outcome = write_site_config(output_dir, &site.name, &content)?;
    Ok((site, outcome))
}

/// Generates one configuration file per site, printing one line per site.
///
/// # Errors
/// * `Error::DirectoryMissing` if `output_dir` does not exist; nothing is
///   rendered or written in that case
pub fn generate<P: AsRef<Path>>(
    config: &SiteConfig,
    output_dir: P,
    renderer: &dyn VHostRenderer,
) -> Result<Report> {
    let output_dir = ensure_output_dir(output_dir)?;
    debug!("Generating {} sites into {}", config.sites.len(), output_dir.display());

    let mut report = Report::default();
    for (name, site) in merge_all(config) {
        let result = process_site(renderer, &output_dir, site);
        match &result {
            Ok((_, outcome)) => println!("{outcome}"),
            Err(e @ (Error::MissingRequiredField { .. } | Error::InvalidSite { .. })) => {
                println!("Skipping site: {e}")
            }
            Err(e) => println!("Skipping site '{name}': {e}"),
        }
        report.sites.push(SiteOutcome { name, result });
    }

    Ok(report)
}
