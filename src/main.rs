//! vhostgen's main application entry point and orchestration logic.

use vhostgen::{
    cli::{get_args, Args},
    config::{load_config, ConfigState},
    error::{default_error_handler, Result},
    generator::generate,
    hint::print_hint,
    logger::init_logger,
    preflight::{check_modules, ApacheCtl},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the settings file, or writes a starter one and stops
/// 2. Warns about missing Apache modules
/// 3. Renders and writes every site, failing early on a missing output directory
/// 4. Prints the certbot hint
fn run(args: Args) -> Result<()> {
    let config = match load_config(&args.config)? {
        ConfigState::Created(path) => {
            println!("generated default config at {}", path.display());
            return Ok(());
        }
        ConfigState::Loaded(config) => config,
    };

    if !args.skip_preflight {
        check_modules(&ApacheCtl::new(args.apachectl));
    }

    let renderer = MiniJinjaRenderer::new();
    let report = generate(&config, &args.output_dir, &renderer)?;

    if report.failures() > 0 {
        log::warn!("{} of {} sites were skipped", report.failures(), report.sites.len());
    }
    print_hint(&report.certificate_domains());
    Ok(())
}
