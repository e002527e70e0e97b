use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "CYCLETIME_FORECAST_LOG";

/// Installs the stderr subscriber.
///
/// `CYCLETIME_FORECAST_LOG` wins when set. Otherwise the level follows the
/// `-v` count: warn, info, then debug.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
