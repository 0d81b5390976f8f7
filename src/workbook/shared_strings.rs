//! Workbook shared strings parsing.

use crate::error::Result;
use quick_xml::events::Event;

/// The workbook-level shared strings table.
///
/// String cells store an index into this table instead of the text itself.
/// Each `<si>` entry may be a single `<t>` run or a sequence of rich-text
/// runs, which are concatenated. Phonetic guide runs (`<rPh>`) are skipped:
/// they annotate pronunciation and are not part of the cell text.
#[derive(Debug, Clone, Default)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Parse shared strings from XML content.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut strings = Vec::new();
        // The entry under construction; None outside of <si>
        let mut entry: Option<String> = None;
        let mut in_phonetic = false;
        let mut capture = false;

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"si" => entry = Some(String::new()),
                    b"rPh" => in_phonetic = true,
                    b"t" if entry.is_some() && !in_phonetic => capture = true,
                    _ => {}
                },
                Event::Text(e) if capture => {
                    if let Some(text) = entry.as_mut() {
                        text.push_str(&e.unescape().unwrap_or_default());
                    }
                }
                Event::End(e) => match e.name().as_ref() {
                    b"si" => strings.push(entry.take().unwrap_or_default()),
                    b"rPh" => in_phonetic = false,
                    b"t" => capture = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(Self { strings })
    }

    /// Get a string by index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(|s| s.as_str())
    }

    /// Number of entries in the table.
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
