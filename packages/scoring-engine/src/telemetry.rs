use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global tracing subscriber for binaries.
///
/// `RUST_LOG` overrides `default_filter`. `json` switches to one JSON object per line.
pub fn init_tracing(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.with_ansi(false).json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .init();
    }
}
