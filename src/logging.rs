// Tracing setup
//
// Logs go to stderr so they never interleave with the interactive prompts
// on stdout. RUST_LOG overrides the level chosen here.

use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "warn,crew_helper=debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
