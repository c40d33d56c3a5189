//! Table data as delivered by the table extractor.
//!
//! Tables are interleaved into the paragraph stream as a single flattened
//! paragraph so structural detection sees them in document position:
//!
//! ```text
//! [Table: Col1 | Col2]
//! val1 | val2
//! ```

use super::ParagraphRecord;
use serde::{Deserialize, Serialize};

/// Prefixes that open a flattened table paragraph.
const TABLE_PREFIXES: [&str; 2] = ["[Table:", "[Tabla:"];

/// A table as ordered rows of cell texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table; the first row is the header
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw rows, trimming cells and dropping rows whose
    /// cells are all empty.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.as_ref().trim().to_string())
                    .collect::<Vec<_>>()
            })
            .filter(|row| row.iter().any(|c| !c.is_empty()))
            .collect();
        Self { rows }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Flatten into the readable paragraph form.
    pub fn to_paragraph_text(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.iter().enumerate() {
            let joined = row.join(" | ");
            if i == 0 {
                lines.push(format!("[Table: {}]", joined));
            } else {
                lines.push(joined);
            }
        }
        lines.join("\n")
    }

    /// Flatten into a paragraph record, or `None` for an empty table.
    pub fn to_record(&self) -> Option<ParagraphRecord> {
        if self.is_empty() {
            None
        } else {
            Some(ParagraphRecord::with_style(self.to_paragraph_text(), "Table"))
        }
    }

    /// Parse a flattened table paragraph back into rows.
    pub fn parse_flattened(text: &str) -> Option<Self> {
        let text = text.trim();
        let prefix = TABLE_PREFIXES.iter().find(|p| text.starts_with(*p))?;

        let mut rows = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let mut line = line.trim();
            if i == 0 {
                line = line[prefix.len()..].trim();
                line = line.strip_suffix(']').unwrap_or(line).trim();
            }
            if line.is_empty() {
                continue;
            }
            rows.push(line.split('|').map(|c| c.trim().to_string()).collect());
        }

        if rows.is_empty() {
            None
        } else {
            Some(Self { rows })
        }
    }

    /// Check if a paragraph text is a flattened table.
    pub fn is_flattened(text: &str) -> bool {
        let text = text.trim_start();
        TABLE_PREFIXES.iter().any(|p| text.starts_with(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_drops_empty() {
        let table = Table::from_rows(vec![
            vec![" Name ", "Port"],
            vec!["", " "],
            vec!["HTTP", "80"],
        ]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.header(), Some(&["Name".to_string(), "Port".to_string()][..]));
        assert_eq!(table.body().len(), 1);
    }

    #[test]
    fn test_flatten_format() {
        let table = Table::from_rows(vec![vec!["Col1", "Col2"], vec!["val1", "val2"]]);
        assert_eq!(table.to_paragraph_text(), "[Table: Col1 | Col2]\nval1 | val2");
        let record = table.to_record().unwrap();
        assert_eq!(record.style_hint, "Table");
        assert!(Table::new().to_record().is_none());
    }

    #[test]
    fn test_parse_flattened() {
        let table = Table::parse_flattened("[Tabla: Protocolo | Puerto]\nHTTP | 80\nSSH | 22").unwrap();
        assert_eq!(table.rows[0], vec!["Protocolo", "Puerto"]);
        assert_eq!(table.rows[2], vec!["SSH", "22"]);
        assert!(Table::parse_flattened("Not a table").is_none());
        assert!(Table::is_flattened("  [Table: A]"));
    }
}
