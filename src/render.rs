//! JSON renderer for the register.

use crate::error::Result;
use crate::model::Register;

/// JSON output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JsonFormat {
    /// Compact single-line JSON
    Compact,
    /// Pretty-printed with 2-space indentation
    #[default]
    Pretty,
}

/// Serialize a register to JSON.
///
/// Non-ASCII characters are preserved literally, not escaped, so the output
/// stays readable for registers kept in any script.
pub fn to_json(register: &Register, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Compact => serde_json::to_string(register)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(register)?,
    };
    Ok(json)
}
