//! The letter record and the output register document.

use serde::{Deserialize, Serialize};

/// Number of columns read from each worksheet row.
pub const FIELD_COUNT: usize = 15;

/// One correspondence record, mapped positionally from columns 1-15.
///
/// Every field is always a string, possibly empty; nothing else survives
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterRecord {
    /// Letter number (column 1)
    pub letter_no: String,
    /// Letter date (column 2)
    pub letter_date: String,
    /// Secretariat registration number (column 3)
    pub secretariat_no: String,
    /// Secretariat registration date (column 4)
    pub secretariat_date: String,
    /// Project name (column 5)
    pub project_name: String,
    /// Project code (column 6)
    pub project_code: String,
    /// Subject line (column 7)
    pub subject: String,
    /// Raw kind/direction label as written in the register (column 8)
    pub kind_raw: String,
    /// Sender name (column 9)
    pub from_name: String,
    /// Recipient name (column 10)
    pub to_name: String,
    /// Organization name (column 11)
    pub org_name: String,
    /// Related document reference (column 12)
    pub related_doc: String,
    /// Attachment yes/no flag as written (column 13)
    pub attachment_flag: String,
    /// Attachment description (column 14)
    pub attachment_desc: String,
    /// Free-form tag (column 15)
    pub tag: String,
}

impl LetterRecord {
    /// Build a record from the 15 normalized column values, in column order.
    pub fn from_columns(values: [String; FIELD_COUNT]) -> Self {
        let [letter_no, letter_date, secretariat_no, secretariat_date, project_name, project_code, subject, kind_raw, from_name, to_name, org_name, related_doc, attachment_flag, attachment_desc, tag] =
            values;
        Self {
            letter_no,
            letter_date,
            secretariat_no,
            secretariat_date,
            project_name,
            project_code,
            subject,
            kind_raw,
            from_name,
            to_name,
            org_name,
            related_doc,
            attachment_flag,
            attachment_desc,
            tag,
        }
    }
}

/// The output document: the ordered sequence of retained records.
///
/// Serializes to `{"rows": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    /// Retained records in source row order
    pub rows: Vec<LetterRecord>,
}

impl Register {
    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the register holds no records.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(values: [&str; FIELD_COUNT]) -> [String; FIELD_COUNT] {
        values.map(String::from)
    }

    #[test]
    fn test_from_columns_positional() {
        let record = LetterRecord::from_columns(columns([
            "L-1", "2024-01-01", "S-9", "", "Proj", "P1", "Subj", "Incoming", "Alice", "Bob",
            "OrgX", "", "Yes", "desc", "",
        ]));

        assert_eq!(record.letter_no, "L-1");
        assert_eq!(record.letter_date, "2024-01-01");
        assert_eq!(record.secretariat_no, "S-9");
        assert_eq!(record.secretariat_date, "");
        assert_eq!(record.project_name, "Proj");
        assert_eq!(record.project_code, "P1");
        assert_eq!(record.subject, "Subj");
        assert_eq!(record.kind_raw, "Incoming");
        assert_eq!(record.from_name, "Alice");
        assert_eq!(record.to_name, "Bob");
        assert_eq!(record.org_name, "OrgX");
        assert_eq!(record.related_doc, "");
        assert_eq!(record.attachment_flag, "Yes");
        assert_eq!(record.attachment_desc, "desc");
        assert_eq!(record.tag, "");
    }

    #[test]
    fn test_register_serializes_under_rows_key() {
        let register = Register {
            rows: vec![LetterRecord::from_columns(columns([
                "L-1", "", "", "", "", "", "", "", "", "", "", "", "", "", "",
            ]))],
        };

        let json = serde_json::to_string(&register).unwrap();
        assert!(json.starts_with("{\"rows\":["));
        assert!(json.contains("\"letter_no\":\"L-1\""));
    }

    #[test]
    fn test_register_roundtrip() {
        let register = Register {
            rows: vec![LetterRecord::from_columns(columns([
                "L-7", "1404/01/15", "S-2", "1404/01/16", "Proj", "P2", "Subj", "صادره", "Alice",
                "Bob", "Org", "L-3", "Yes", "CD", "urgent",
            ]))],
        };

        let json = serde_json::to_string_pretty(&register).unwrap();
        let parsed: Register = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, register);
    }

    #[test]
    fn test_empty_register() {
        let register = Register::default();
        assert!(register.is_empty());
        assert_eq!(register.len(), 0);
        assert_eq!(serde_json::to_string(&register).unwrap(), "{\"rows\":[]}");
    }
}
