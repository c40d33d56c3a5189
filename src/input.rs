//! Reading paragraph streams and declared units.
//!
//! The document reader hands over paragraphs either as a JSON array or as
//! plain text with blank lines between paragraphs. JSON entries may be full
//! records, bare strings, or tables given as rows of cells; tables are
//! flattened into a paragraph at their position in the stream.

use crate::error::{Error, Result};
use crate::model::{DeclaredUnit, ParagraphRecord, Table};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Deserialize)]
#[serde(untagged)]
enum InputEntry {
    Text(String),
    Table { table: Vec<Vec<String>> },
    Record(ParagraphRecord),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DeclaredEntry {
    Number(u32),
    Unit(DeclaredUnit),
}

/// Parse paragraph records from JSON.
///
/// Accepts a top-level array, or an object with a `paragraphs` array.
///
/// # Example
///
/// ```
/// use docoutline::input::parse_json;
///
/// let records = parse_json(r#"["UNIT 1: Basics", {"text": "Body.", "styleHint": "Normal"}]"#).unwrap();
/// assert_eq!(records.len(), 2);
/// ```
pub fn parse_json(json: &str) -> Result<Vec<ParagraphRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("paragraphs") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(Error::InvalidInput(
                    "expected a \"paragraphs\" array".to_string(),
                ))
            }
        },
        _ => {
            return Err(Error::InvalidInput(
                "expected an array of paragraphs".to_string(),
            ))
        }
    };

    let mut records = Vec::with_capacity(entries.len());
    for (i, entry) in entries.into_iter().enumerate() {
        let entry: InputEntry = serde_json::from_value(entry)
            .map_err(|e| Error::InvalidInput(format!("paragraph {}: {}", i, e)))?;
        match entry {
            InputEntry::Text(text) => records.push(ParagraphRecord::new(text)),
            InputEntry::Record(record) => records.push(record),
            InputEntry::Table { table } => {
                if let Some(record) = Table::from_rows(table).to_record() {
                    records.push(record);
                }
            }
        }
    }

    log::debug!("Parsed {} paragraph records from JSON", records.len());
    Ok(records)
}

/// Split plain text into paragraph records at blank lines.
///
/// Line breaks inside a paragraph are kept. The first line of a paragraph
/// is trimmed; later lines keep their indentation so code stays readable.
pub fn parse_text(text: &str) -> Vec<ParagraphRecord> {
    let mut records = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(ParagraphRecord::new(current.join("\n")));
                current.clear();
            }
        } else if current.is_empty() {
            current.push(line.trim());
        } else {
            current.push(line.trim_end());
        }
    }
    if !current.is_empty() {
        records.push(ParagraphRecord::new(current.join("\n")));
    }

    records
}

/// Read paragraph records from a file.
///
/// Files with a `.json` extension are parsed as JSON; anything else is read
/// as plain text.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<ParagraphRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    if is_json_path(path) {
        parse_json(&content)
    } else {
        Ok(parse_text(&content))
    }
}

/// Parse declared units from JSON: an array of `{"number", "title"}`
/// objects or of bare numbers.
pub fn parse_declared_units(json: &str) -> Result<Vec<DeclaredUnit>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(entries) = value else {
        return Err(Error::InvalidInput(
            "expected an array of declared units".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry: DeclaredEntry = serde_json::from_value(entry)
                .map_err(|e| Error::InvalidInput(format!("declared unit {}: {}", i, e)))?;
            Ok(match entry {
                DeclaredEntry::Number(number) => DeclaredUnit::new(number, String::new()),
                DeclaredEntry::Unit(unit) => unit,
            })
        })
        .collect()
}

/// Read declared units from a JSON file.
pub fn parse_declared_file<P: AsRef<Path>>(path: P) -> Result<Vec<DeclaredUnit>> {
    let content = fs::read_to_string(path)?;
    parse_declared_units(&content)
}

fn is_json_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_mixed_entries() {
        let json = r#"[
            "Plain paragraph",
            {"text": "UNIT 1: Basics", "styleHint": "Heading1", "isHeadingHint": true},
            {"table": [["Name", "Port"], ["HTTP", "80"]]},
            {"table": []}
        ]"#;
        let records = parse_json(json).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].style_hint, "Normal");
        assert!(records[1].is_heading_hint);
        assert_eq!(records[2].text, "[Table: Name | Port]\nHTTP | 80");
    }

    #[test]
    fn test_parse_json_object_form() {
        let records = parse_json(r#"{"paragraphs": ["A", "B"]}"#).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_parse_json_rejects_non_array() {
        assert!(matches!(parse_json("42"), Err(Error::InvalidInput(_))));
        assert!(matches!(
            parse_json(r#"{"items": []}"#),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(parse_json("[1]"), Err(Error::InvalidInput(_))));
        assert!(matches!(parse_json("not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_parse_text_blank_lines() {
        let records = parse_text("UNIT 1: Basics\n\n  First line\nsecond line  \n\n\n\nLast");
        let texts: Vec<&str> = records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["UNIT 1: Basics", "First line\nsecond line", "Last"]);
        assert!(parse_text("  \n\n ").is_empty());

        let records = parse_text("def area(r):\n    return 3.14 * r * r\n");
        assert_eq!(records[0].text, "def area(r):\n    return 3.14 * r * r");
    }

    #[test]
    fn test_parse_declared_units() {
        let units = parse_declared_units(r#"[{"number": 1, "title": "Intro"}, 2]"#).unwrap();
        assert_eq!(units, vec![DeclaredUnit::new(1, "Intro"), DeclaredUnit::new(2, "")]);
        assert!(parse_declared_units(r#"{"number": 1}"#).is_err());
        assert!(parse_declared_units(r#"["one"]"#).is_err());
    }

    #[test]
    fn test_is_json_path() {
        assert!(is_json_path(Path::new("doc.JSON")));
        assert!(!is_json_path(Path::new("doc.txt")));
        assert!(!is_json_path(Path::new("doc")));
    }
}
