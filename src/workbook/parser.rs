//! Workbook and worksheet parsing.

use crate::container::{Relationships, XlsxContainer};
use crate::error::{Error, Result};
use crate::model::{CellScalar, Worksheet};
use quick_xml::events::{BytesStart, Event};
use std::path::Path;

use super::shared_strings::SharedStrings;

/// Sheet info from workbook.xml.
#[derive(Debug, Clone)]
struct SheetInfo {
    name: String,
    rel_id: String,
}

/// Which worksheet to read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    /// The workbook's active sheet (first sheet when no view state is
    /// recorded)
    #[default]
    Active,
    /// A sheet selected by exact name
    Name(String),
}

/// Parser for XLSX (Excel) workbooks.
#[derive(Debug)]
pub struct WorkbookParser {
    container: XlsxContainer,
    shared_strings: SharedStrings,
    sheets: Vec<SheetInfo>,
    relationships: Relationships,
    active_tab: usize,
}

impl WorkbookParser {
    /// Open an XLSX file for parsing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let container = XlsxContainer::open(path)?;
        Self::from_container(container)
    }

    /// Create a parser from bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let container = XlsxContainer::from_bytes(data)?;
        Self::from_container(container)
    }

    /// Create a parser from a container.
    fn from_container(container: XlsxContainer) -> Result<Self> {
        // Shared strings are optional: workbooks without string cells omit
        // the part entirely.
        let shared_strings = if let Ok(xml) = container.read_xml("xl/sharedStrings.xml") {
            SharedStrings::parse(&xml)?
        } else {
            SharedStrings::default()
        };

        let relationships = container.read_relationships("xl/workbook.xml")?;

        let workbook_xml = container.read_xml("xl/workbook.xml")?;
        let (sheets, active_tab) = Self::parse_workbook(&workbook_xml)?;

        Ok(Self {
            container,
            shared_strings,
            sheets,
            relationships,
            active_tab,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    /// Parse workbook.xml for the sheet list and the active tab index.
    fn parse_workbook(xml: &str) -> Result<(Vec<SheetInfo>, usize)> {
        let mut sheets = Vec::new();
        let mut active_tab = 0usize;

        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Empty(e) | Event::Start(e) => match e.name().as_ref() {
                    b"sheet" => {
                        let mut name = String::new();
                        let mut rel_id = String::new();

                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"name" => {
                                    name = attr.unescape_value().unwrap_or_default().into_owned()
                                }
                                b"r:id" => {
                                    rel_id = attr.unescape_value().unwrap_or_default().into_owned()
                                }
                                _ => {}
                            }
                        }

                        if !name.is_empty() {
                            sheets.push(SheetInfo { name, rel_id });
                        }
                    }
                    b"workbookView" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"activeTab" {
                                active_tab =
                                    attr.unescape_value().unwrap_or_default().parse().unwrap_or(0);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok((sheets, active_tab))
    }

    /// Resolve a selector to a sheet entry.
    fn resolve_sheet(&self, selector: &SheetSelector) -> Result<&SheetInfo> {
        match selector {
            SheetSelector::Active => self
                .sheets
                .get(self.active_tab)
                .or_else(|| self.sheets.first())
                .ok_or(Error::NoWorksheets),
            SheetSelector::Name(name) => self
                .sheets
                .iter()
                .find(|s| s.name == *name)
                .ok_or_else(|| Error::SheetNotFound(name.clone())),
        }
    }

    /// Parse the selected worksheet into a cell grid.
    pub fn parse_sheet(&self, selector: &SheetSelector) -> Result<Worksheet> {
        let info = self.resolve_sheet(selector)?;

        let target = self
            .relationships
            .get(&info.rel_id)
            .map(|rel| rel.target.clone())
            .ok_or_else(|| Error::MissingComponent(format!("worksheet part for '{}'", info.name)))?;
        let sheet_path = XlsxContainer::resolve_path("xl/workbook.xml", &target);

        let xml = self.container.read_xml(&sheet_path)?;
        self.parse_sheet_xml(&info.name, &xml)
    }

    /// Parse a worksheet XML part into a grid.
    ///
    /// Cells are placed at the absolute positions named by their `r`
    /// reference attributes; writers may omit references, in which case
    /// placement falls back to the position after the previous cell.
    fn parse_sheet_xml(&self, name: &str, xml: &str) -> Result<Worksheet> {
        let mut sheet = Worksheet::new(name);
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut current_row: u32 = 0;
        let mut current_col: u32 = 0;
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_inline = false;
        let mut cell_type: Option<String> = None;
        let mut cell_value = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"row" => {
                        current_row = row_number(&e).unwrap_or(current_row + 1);
                        current_col = 0;
                        sheet.touch_row(current_row);
                    }
                    b"c" => {
                        in_cell = true;
                        cell_value.clear();
                        let (col, ty) = cell_attributes(&e);
                        current_col = col.unwrap_or(current_col + 1);
                        cell_type = ty;
                    }
                    b"v" if in_cell => in_value = true,
                    b"is" if in_cell => in_inline = true,
                    b"t" if in_inline => in_value = true,
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"row" => {
                        current_row = row_number(&e).unwrap_or(current_row + 1);
                        current_col = 0;
                        sheet.touch_row(current_row);
                    }
                    b"c" => {
                        // Valueless cell, usually style-only. It still
                        // extends the populated bounds.
                        let (col, _) = cell_attributes(&e);
                        current_col = col.unwrap_or(current_col + 1);
                        sheet.set(current_row, current_col, CellScalar::Empty);
                    }
                    _ => {}
                },
                Event::Text(e) if in_value => {
                    cell_value.push_str(&e.unescape().unwrap_or_default());
                }
                Event::End(e) => match e.name().as_ref() {
                    b"c" => {
                        let scalar = self.resolve_cell(&cell_value, cell_type.as_deref());
                        sheet.set(current_row, current_col, scalar);
                        in_cell = false;
                    }
                    b"v" | b"t" => in_value = false,
                    b"is" => in_inline = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(sheet)
    }

    /// Type a raw cell value based on the cell's `t` attribute.
    ///
    /// `<v>` carries the cached computed value for formula cells, so formula
    /// text is never consulted.
    fn resolve_cell(&self, raw: &str, cell_type: Option<&str>) -> CellScalar {
        if raw.is_empty() {
            return CellScalar::Empty;
        }
        match cell_type {
            Some("s") => {
                // Shared string index
                match raw.parse::<usize>() {
                    Ok(idx) => {
                        CellScalar::Text(self.shared_strings.get(idx).unwrap_or("").to_string())
                    }
                    Err(_) => CellScalar::Text(raw.to_string()),
                }
            }
            Some("b") => CellScalar::Bool(raw == "1"),
            Some("str") | Some("inlineStr") => CellScalar::Text(raw.to_string()),
            // Computed error values stay as their literal text (#DIV/0! etc)
            Some("e") => CellScalar::Text(raw.to_string()),
            _ => match raw.parse::<f64>() {
                Ok(n) => CellScalar::Number(n),
                Err(_) => CellScalar::Text(raw.to_string()),
            },
        }
    }
}

/// Read the `r` attribute of a row element.
fn row_number(e: &BytesStart<'_>) -> Option<u32> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"r" {
            return String::from_utf8_lossy(&attr.value).parse().ok();
        }
    }
    None
}

/// Read the column (from the `r` reference) and `t` type of a cell element.
fn cell_attributes(e: &BytesStart<'_>) -> (Option<u32>, Option<String>) {
    let mut col = None;
    let mut cell_type = None;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"r" => {
                let reference = String::from_utf8_lossy(&attr.value);
                col = parse_cell_ref(&reference).map(|(_, c)| c);
            }
            b"t" => {
                cell_type = Some(String::from_utf8_lossy(&attr.value).to_string());
            }
            _ => {}
        }
    }

    (col, cell_type)
}

/// Parse an A1-style cell reference into 1-indexed (row, column).
fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let digits_at = reference.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = reference.split_at(digits_at);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }

    Some((row, col))
}
