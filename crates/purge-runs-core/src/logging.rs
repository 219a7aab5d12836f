use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const DEFAULT_LOG_FILTER: &str = "purge_runs=info,purge_runs_core=info,purge_runs_github=info";

pub const DEBUG_LOG_FILTER: &str =
    "purge_runs=debug,purge_runs_core=debug,purge_runs_github=debug";

pub fn init() {
    init_with_default(DEFAULT_LOG_FILTER);
}

/// Installs the global subscriber; `RUST_LOG` wins over `default_filter`.
/// Output goes to stderr so stdout stays free for the report.
pub fn init_with_default(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

pub fn init_verbose() {
    init_with_default(DEBUG_LOG_FILTER);
}
