/// Sets up `env_logger` for the process. Diagnostics are hidden below `Warn`
/// unless `verbose` is set; operator-facing lines are printed, not logged.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .format_target(false)
        .init();
}
