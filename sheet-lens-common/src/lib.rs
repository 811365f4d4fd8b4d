pub mod config;
pub use config::{Config, DisplayConfig, ExportConfig, ProfilingConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SheetLensError {
    #[error("cannot open workbook '{path}': {reason}")]
    UnreadableWorkbook { path: String, reason: String },
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("error reading sheet '{sheet}': {reason}")]
    SheetRead { sheet: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("value out of range: {0}")]
    OutOfRange(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SheetLensError>;
