use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "permit_viewer=warn";

fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_DIRECTIVE,
        1 => "permit_viewer=info",
        _ => "permit_viewer=debug",
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over the `-v` count when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
