use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; the `debug_logging`
/// preference raises it to `debug`, in which case `RUST_LOG` may override
/// the filter entirely.
pub fn init(debug: bool) {
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        // Force `info` so a stray RUST_LOG in the environment cannot make
        // the overlay chatty when debug logging is off.
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
