//! Row extraction and register building.

use crate::model::{LetterRecord, Register, Worksheet, FIELD_COUNT};

/// First data row; row 1 is always the header.
pub const DATA_START_ROW: u32 = 2;

/// Read one worksheet row as its 15 normalized column values.
///
/// Columns beyond [`FIELD_COUNT`] are ignored; absent cells read as empty
/// strings. Pure function of the worksheet and row index.
pub fn read_row(sheet: &Worksheet, row: u32) -> [String; FIELD_COUNT] {
    std::array::from_fn(|i| sheet.value(row, i as u32 + 1).normalize())
}

/// Build the register from a parsed worksheet.
///
/// Walks rows 2 through the last populated row, dropping rows whose 15
/// normalized values are all empty. Retained records keep source row order.
/// A sheet with no data rows yields an empty register.
pub fn extract_register(sheet: &Worksheet) -> Register {
    let mut rows = Vec::new();

    for row in DATA_START_ROW..=sheet.max_row() {
        let values = read_row(sheet, row);
        if values.iter().all(|v| v.is_empty()) {
            continue;
        }
        rows.push(LetterRecord::from_columns(values));
    }

    Register { rows }
}
