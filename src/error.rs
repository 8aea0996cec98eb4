use std::io;

use thiserror::Error;

/// Application-wide error type for the annexfour CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("{0}")]
    Save(String),

    #[error("Token must start with '{0}'")]
    InvalidToken(&'static str),

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Docker is not installed or not running.")]
    RuntimeUnavailable,
}

impl AppError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        AppError::Config(msg.into())
    }

    pub fn save<S: Into<String>>(msg: S) -> Self {
        AppError::Save(msg.into())
    }

    /// Lines printed to stderr before the process exits with status 1.
    pub fn report(&self) -> Vec<String> {
        match self {
            AppError::RuntimeUnavailable => vec![
                format!("Error: {self}"),
                "Please install Docker to use this tool: https://docs.docker.com/get-docker/"
                    .to_string(),
            ],
            AppError::Save(message) => vec![format!("Error saving config: {message}")],
            other => vec![format!("Error: {other}")],
        }
    }
}
