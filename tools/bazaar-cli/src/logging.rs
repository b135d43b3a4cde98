//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Logs go to stderr so they never mix with command output. `RUST_LOG`
/// overrides the default level, which is `warn`, or `debug` for the bazaar
/// crates with `--verbose`.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,bazaar_catalog=debug,bazaar_store=debug,bazaar_imagegen=debug,bazaar=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
