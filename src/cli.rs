use std::env::{self, VarError};

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Parser};

use crate::errors::AppError;

pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Parser)]
#[command(name = "nextsignalsentinel")]
#[command(version, about = "Next signal sentinel")]
pub struct Cli {
    /// Enable verbose logging
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub verbose: bool,
    /// Explicit filter directives; replaces the verbosity-based default.
    pub log_filter: Option<String>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        let log_filter = match env::var(LOG_FILTER_ENV) {
            Ok(value) if value.trim().is_empty() => None,
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                return Err(AppError::Config(format!(
                    "{LOG_FILTER_ENV} is not valid unicode"
                )));
            }
        };

        Ok(Self {
            verbose: cli.verbose,
            log_filter,
        })
    }
}
