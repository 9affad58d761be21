use super::cli::get_env;
use super::metadata::log_version_info;
use crate::app::{PosterApp, settings::Settings};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is not set
const DEFAULT_LOG_FILTER: &str = "info";

/// Native entry point
pub async fn native_main() -> ExitCode {
    // Setup logging (stderr, so stdout stays clean for scene output)
    let filter = get_env::<String>("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    log_version_info();
    let settings = Settings::from_cli();

    let report = PosterApp::new(settings).run().await;
    if report.failed == 0 {
        ExitCode::SUCCESS
    } else {
        tracing::error!(
            "{} of {} files could not be turned into a poster",
            report.failed,
            report.failed + report.succeeded
        );
        ExitCode::FAILURE
    }
}
