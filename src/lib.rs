//! # lettersheet
//!
//! Correspondence register extraction from XLSX workbooks to JSON.
//!
//! This library reads a spreadsheet of correspondence records ("letters"),
//! walks the data rows of one worksheet, normalizes the 15 register columns
//! of each row to plain strings, and collects the non-blank rows into a
//! `{"rows": [...]}` document.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lettersheet::{extract_file, render, JsonFormat};
//!
//! let register = extract_file("letters.xlsx")?;
//! println!("Rows: {}", register.len());
//!
//! let json = render::to_json(&register, JsonFormat::Pretty)?;
//! std::fs::write("letters.json", json)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Sheet selection
//!
//! The active worksheet is read by default. To read a specific sheet, use
//! the two-step API:
//!
//! ```no_run
//! use lettersheet::extract::extract_register;
//! use lettersheet::workbook::{SheetSelector, WorkbookParser};
//!
//! let parser = WorkbookParser::open("letters.xlsx")?;
//! let sheet = parser.parse_sheet(&SheetSelector::Name("1404".to_string()))?;
//! let register = extract_register(&sheet);
//! # Ok::<(), lettersheet::Error>(())
//! ```

pub mod container;
pub mod error;
pub mod extract;
pub mod model;
pub mod render;
pub mod workbook;

// Re-exports
pub use error::{Error, Result};
pub use extract::{extract_register, DATA_START_ROW};
pub use model::{CellScalar, LetterRecord, Register, Worksheet, FIELD_COUNT};
pub use render::JsonFormat;
pub use workbook::{SheetSelector, WorkbookParser};

use std::path::Path;

/// Extract the register from a workbook file, reading the active worksheet.
///
/// # Example
///
/// ```no_run
/// use lettersheet::extract_file;
///
/// let register = extract_file("letters.xlsx")?;
/// println!("Rows: {}", register.len());
/// # Ok::<(), lettersheet::Error>(())
/// ```
pub fn extract_file(path: impl AsRef<Path>) -> Result<Register> {
    let parser = WorkbookParser::open(path)?;
    let sheet = parser.parse_sheet(&SheetSelector::Active)?;
    Ok(extract_register(&sheet))
}

/// Extract the register from workbook bytes, reading the active worksheet.
///
/// # Example
///
/// ```no_run
/// use lettersheet::extract_bytes;
///
/// let data = std::fs::read("letters.xlsx")?;
/// let register = extract_bytes(&data)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_bytes(data: &[u8]) -> Result<Register> {
    let parser = WorkbookParser::from_bytes(data.to_vec())?;
    let sheet = parser.parse_sheet(&SheetSelector::Active)?;
    Ok(extract_register(&sheet))
}
