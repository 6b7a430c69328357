use tracing::Dispatch;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::Config;
use crate::errors::AppError;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter used when no explicit directives are configured.
pub fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("warn,{CRATE_TARGET}={level}")
}

/// Drops blanks around and between comma-separated directives.
pub fn normalize_directives(raw: &str) -> String {
    raw.split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

pub fn build_filter(config: &Config) -> Result<EnvFilter, AppError> {
    let directives = match &config.log_filter {
        Some(raw) => normalize_directives(raw),
        None => default_directives(config.verbose),
    };

    EnvFilter::builder().parse(&directives).map_err(|error| {
        AppError::Logging(format!("invalid log filter {directives:?}: {error}"))
    })
}

/// Builds the subscriber for one run. The caller scopes it with
/// `tracing::dispatcher::with_default`; nothing is installed globally.
pub fn build_dispatch(
    config: &Config,
    writer: BoxMakeWriter,
    ansi: bool,
) -> Result<Dispatch, AppError> {
    let filter = build_filter(config)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .finish();

    Ok(Dispatch::new(subscriber))
}
