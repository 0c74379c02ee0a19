use std::path::PathBuf;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config error: {0}")]
    Config(#[from] ic_config::ConfigError),

    #[error("Controller error: {0}")]
    Control(#[from] ic_controls::ControlError),

    #[error("Failed to read input file: {path}")]
    InputRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Line {line}: cannot parse measurement {text:?}")]
    BadMeasurement { line: u64, text: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
