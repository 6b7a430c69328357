pub mod app;
pub mod cli;
pub mod errors;
pub mod logging;
