//! Logging setup shared by the command line tools.

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Send log events to stderr.
///
/// Events at `info` and above are shown by default. Set `RUST_LOG` to
/// change the level, e.g. `RUST_LOG=fuel_station_pos=debug`.
///
/// Logs go to stderr so that report output on stdout stays machine readable.
pub fn setup_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .init();
}
