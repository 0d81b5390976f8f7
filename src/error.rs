//! Error types for the lettersheet library.

use std::io;
use thiserror::Error;

/// Result type alias for lettersheet operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a workbook or writing the register.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading the XLSX ZIP package.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// A required package part is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// The requested worksheet does not exist in the workbook.
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The workbook declares no worksheets at all.
    #[error("Workbook contains no worksheets")]
    NoWorksheets,

    /// Error serializing the register to JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}
