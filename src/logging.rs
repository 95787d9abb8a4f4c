use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Logs go to stderr so previews on stdout stay pipeable.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "invoicedl=debug"
    } else {
        "invoicedl=info"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
