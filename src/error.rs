//! Error types for zfspace operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ZfspaceError>;

#[derive(Error, Debug)]
pub enum ZfspaceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "There is no dataset {name} in the system.\nThe following datasets were found by \"zfs list\": {}",
        .available.join(", ")
    )]
    UnknownDataset { name: String, available: Vec<String> },

    #[error("Size cannot be negative: {size}")]
    InvalidSize { size: i128 },

    #[error("Invalid size format: {format}. Use 'long' or 'short'")]
    InvalidFormat { format: String },

    #[error("Unexpected output from storage tool: {message}")]
    OracleProtocol { message: String },

    #[error(
        "Terminal too narrow: {width} columns cannot hold {slices} slices with {padding} columns of padding"
    )]
    LayoutTooNarrow {
        width: usize,
        slices: usize,
        padding: usize,
    },

    #[error("Inconsistent space measurements: {message}")]
    InconsistentSpace { message: String },

    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("String conversion error: {0}")]
    StringConversion(#[from] std::string::FromUtf8Error),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl ZfspaceError {
    pub fn unknown_dataset(name: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownDataset {
            name: name.into(),
            available,
        }
    }

    pub fn invalid_format(format: impl Into<String>) -> Self {
        Self::InvalidFormat {
            format: format.into(),
        }
    }

    pub fn oracle_protocol(msg: impl Into<String>) -> Self {
        Self::OracleProtocol {
            message: msg.into(),
        }
    }

    pub fn inconsistent_space(msg: impl Into<String>) -> Self {
        Self::InconsistentSpace {
            message: msg.into(),
        }
    }

    pub fn command(command: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Command {
            command: command.into(),
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }
}
