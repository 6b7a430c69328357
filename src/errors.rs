use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),

    #[error("application cannot run again (state: {0})")]
    AlreadyRun(String),
}
