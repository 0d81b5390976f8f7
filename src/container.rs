//! ZIP container access for XLSX packages.

use crate::error::{Error, Result};
use quick_xml::events::Event;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

/// A relationship entry from a `.rels` part.
#[derive(Debug, Clone, Default)]
pub struct Relationship {
    /// Relationship ID (e.g. "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target part path, relative to the part that declared it
    pub target: String,
}

/// The relationships of one package part, keyed by ID.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    by_id: HashMap<String, Relationship>,
}

impl Relationships {
    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Add a relationship.
    pub fn add(&mut self, rel: Relationship) {
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Decode an XML part to a string.
///
/// Parts are almost always UTF-8, but writers exist that emit UTF-16 with a
/// BOM. Transcoded UTF-16 keeps its original encoding declaration, which the
/// XML parser would then reject, so the declaration is patched after
/// transcoding.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(invalid_data),
        [0xFF, 0xFE, rest @ ..] => {
            Ok(fix_xml_declaration(&decode_utf16(rest, u16::from_le_bytes)?))
        }
        [0xFE, 0xFF, rest @ ..] => {
            Ok(fix_xml_declaration(&decode_utf16(rest, u16::from_be_bytes)?))
        }
        _ => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            // BOM-less UTF-16 shows up as null bytes interleaved with ASCII
            Err(_) if bytes.len() >= 4 && bytes[1] == 0 && bytes[3] == 0 => {
                decode_utf16(bytes, u16::from_le_bytes)
            }
            Err(_) if bytes.len() >= 4 && bytes[0] == 0 && bytes[2] == 0 => {
                decode_utf16(bytes, u16::from_be_bytes)
            }
            Err(_) => Ok(String::from_utf8_lossy(bytes).into_owned()),
        },
    }
}

fn invalid_data(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
    Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

/// Decode UTF-16 code units combined from byte pairs by `combine`. A
/// trailing odd byte is dropped.
fn decode_utf16(bytes: &[u8], combine: fn([u8; 2]) -> u16) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| combine([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(invalid_data)
}

/// Rewrite a UTF-16 encoding declaration to UTF-8 after transcoding.
fn fix_xml_declaration(content: &str) -> String {
    if !content.starts_with("<?xml") {
        return content.to_string();
    }
    match content.split_once("?>") {
        Some((decl, rest)) => {
            let decl = decl.replace("UTF-16", "UTF-8").replace("utf-16", "UTF-8");
            format!("{decl}?>{rest}")
        }
        None => content.to_string(),
    }
}

/// An XLSX package: a ZIP archive of XML parts plus the relationship parts
/// that wire them together.
pub struct XlsxContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl XlsxContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use lettersheet::container::XlsxContainer;
    ///
    /// let container = XlsxContainer::open("letters.xlsx")?;
    /// # Ok::<(), lettersheet::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut data = Vec::new();
        BufReader::new(File::open(path.as_ref())?).read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Open a package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Read an XML part as text.
    ///
    /// Missing parts surface as [`Error::MissingComponent`].
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut part = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut bytes = Vec::new();
        part.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Names of all parts in the package.
    pub fn part_names(&self) -> Vec<String> {
        self.archive.borrow().file_names().map(String::from).collect()
    }

    /// Parse the relationships of a part (its sibling `.rels` file).
    ///
    /// A part without a `.rels` file has no relationships, which is not an
    /// error.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        let rels_path = match part_path.rsplit_once('/') {
            Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
            None if part_path.is_empty() => "_rels/.rels".to_string(),
            None => format!("_rels/{part_path}.rels"),
        };

        let content = match self.read_xml(&rels_path) {
            Ok(content) => content,
            Err(Error::MissingComponent(_)) => return Ok(Relationships::default()),
            Err(err) => return Err(err),
        };

        parse_relationships(&content)
    }

    /// Resolve a relationship target against the part that declared it.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        if let Some(absolute) = relative.strip_prefix('/') {
            return absolute.to_string();
        }

        let mut segments: Vec<&str> = match base.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').collect(),
            None => Vec::new(),
        };
        for segment in relative.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(name),
            }
        }
        segments.join("/")
    }
}

fn parse_relationships(xml: &str) -> Result<Relationships> {
    let mut rels = Relationships::default();
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Empty(e) | Event::Start(e) if e.name().as_ref() == b"Relationship" => {
                let mut rel = Relationship::default();
                for attr in e.attributes().flatten() {
                    let value = attr.unescape_value().unwrap_or_default().into_owned();
                    match attr.key.as_ref() {
                        b"Id" => rel.id = value,
                        b"Type" => rel.rel_type = value,
                        b"Target" => rel.target = value,
                        _ => {}
                    }
                }
                if !rel.id.is_empty() {
                    rels.add(rel);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

impl std::fmt::Debug for XlsxContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxContainer")
            .field("parts", &self.part_names().len())
            .finish()
    }
}
