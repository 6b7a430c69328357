use std::io::{self, IsTerminal};
use std::time::Instant;

use tracing::{debug, info};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::cli::Config;
use crate::errors::AppError;
use crate::logging::build_dispatch;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Created,
    Running,
    Finished,
    Failed(String),
}

impl RunState {
    pub fn as_status(&self) -> String {
        match self {
            Self::Created => "created".to_string(),
            Self::Running => "running".to_string(),
            Self::Finished => "finished".to_string(),
            Self::Failed(message) => format!("failed: {message}"),
        }
    }
}

enum LogSink {
    Stderr,
    Writer(BoxMakeWriter),
}

impl LogSink {
    /// Resolves the sink into a writer and whether it gets ANSI colors.
    fn into_writer(self) -> (BoxMakeWriter, bool) {
        match self {
            Self::Stderr => (BoxMakeWriter::new(io::stderr), io::stderr().is_terminal()),
            Self::Writer(writer) => (writer, false),
        }
    }
}

pub struct App {
    config: Config,
    log_sink: Option<LogSink>,
    state: RunState,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            log_sink: Some(LogSink::Stderr),
            state: RunState::Created,
        }
    }

    /// Like [`App::new`], but log output goes to `writer` without ANSI colors.
    pub fn with_log_writer<W>(config: Config, writer: W) -> Self
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        Self {
            config,
            log_sink: Some(LogSink::Writer(BoxMakeWriter::new(writer))),
            state: RunState::Created,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        // The sink is consumed by the first run's subscriber.
        let sink = match self.log_sink.take() {
            Some(sink) if self.state == RunState::Created => sink,
            _ => return Err(AppError::AlreadyRun(self.state.as_status())),
        };

        let (writer, ansi) = sink.into_writer();
        let dispatch = match build_dispatch(&self.config, writer, ansi) {
            Ok(dispatch) => dispatch,
            Err(error) => {
                self.state = RunState::Failed(error.to_string());
                return Err(error);
            }
        };

        tracing::dispatcher::with_default(&dispatch, || self.execute())
    }

    fn execute(&mut self) -> Result<(), AppError> {
        let started = Instant::now();
        self.state = RunState::Running;

        info!(version = VERSION, verbose = self.config.verbose, "starting");
        debug!(config = ?self.config, "resolved configuration");

        self.state = RunState::Finished;
        info!(elapsed = ?started.elapsed(), "finished");

        Ok(())
    }
}
