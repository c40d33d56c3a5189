//! Typed content blocks produced by the block classifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One classified fragment of presentable content.
///
/// Blocks are emitted in input order and carry no reference back to the
/// outline they were derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Ordinary paragraph
    Paragraph {
        /// Paragraph text
        text: String,
    },

    /// Short numbered heading inside a unit
    Subtitle {
        /// Heading text without its number
        text: String,
    },

    /// One or more consecutive "Term: explanation" entries
    Definition {
        /// Entries in order
        entries: Vec<DefinitionEntry>,
    },

    /// Consecutive list items
    List {
        /// Item texts without markers
        items: Vec<String>,
    },

    /// Callout introduced by a keyword ("Note", "Importante", ...)
    Tip {
        /// Normalized keyword
        label: String,
        /// Callout body
        text: String,
    },

    /// Flattened table; the first row is the header
    Table {
        /// Cell texts per row
        rows: Vec<Vec<String>>,
    },
}

impl ContentBlock {
    /// Create a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        ContentBlock::Paragraph { text: text.into() }
    }

    /// Create a single-entry definition block.
    pub fn definition(term: impl Into<String>, text: impl Into<String>) -> Self {
        ContentBlock::Definition {
            entries: vec![DefinitionEntry::new(term, text)],
        }
    }

    /// Block kind.
    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Paragraph { .. } => BlockKind::Paragraph,
            ContentBlock::Subtitle { .. } => BlockKind::Subtitle,
            ContentBlock::Definition { .. } => BlockKind::Definition,
            ContentBlock::List { .. } => BlockKind::List,
            ContentBlock::Tip { .. } => BlockKind::Tip,
            ContentBlock::Table { .. } => BlockKind::Table,
        }
    }

    /// Check if this is a multi-entry definition group (rendered as an
    /// accordion rather than a single highlighted block).
    pub fn is_accordion(&self) -> bool {
        matches!(self, ContentBlock::Definition { entries } if entries.len() >= 2)
    }

    /// Plain text of the block.
    pub fn text(&self) -> String {
        match self {
            ContentBlock::Paragraph { text } | ContentBlock::Subtitle { text } => text.clone(),
            ContentBlock::Tip { label, text } => format!("{}: {}", label, text),
            ContentBlock::Definition { entries } => entries
                .iter()
                .map(|e| format!("{}: {}", e.term, e.text))
                .collect::<Vec<_>>()
                .join("\n"),
            ContentBlock::List { items } => items.join("\n"),
            ContentBlock::Table { rows } => rows
                .iter()
                .map(|r| r.join(" | "))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// One "term: explanation" pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionEntry {
    /// Defined term
    pub term: String,
    /// Explanation
    pub text: String,
}

impl DefinitionEntry {
    /// Create a definition entry.
    pub fn new(term: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            text: text.into(),
        }
    }
}

/// Language of a detected code snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Python,
    Sql,
    JavaScript,
    Html,
}

impl CodeLanguage {
    /// Lower-case language name, as used in fenced code blocks.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Python => "python",
            CodeLanguage::Sql => "sql",
            CodeLanguage::JavaScript => "javascript",
            CodeLanguage::Html => "html",
        }
    }
}

impl fmt::Display for CodeLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source code found in document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Detected language
    pub language: CodeLanguage,
    /// Code as written, trimmed
    pub code: String,
}

impl CodeBlock {
    /// Create a code block.
    pub fn new(language: CodeLanguage, code: impl Into<String>) -> Self {
        Self {
            language,
            code: code.into(),
        }
    }

    /// Number of lines of code.
    pub fn line_count(&self) -> usize {
        self.code.lines().count()
    }
}

/// Kind of a content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Ordinary paragraph
    Paragraph,
    /// Numbered subtitle
    Subtitle,
    /// Definition or definition group
    Definition,
    /// Bulleted/numbered list
    List,
    /// Callout
    Tip,
    /// Table
    Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kind_and_text() {
        let b = ContentBlock::definition("Router", "Forwards packets between networks.");
        assert_eq!(b.kind(), BlockKind::Definition);
        assert!(!b.is_accordion());
        assert_eq!(b.text(), "Router: Forwards packets between networks.");

        let list = ContentBlock::List {
            items: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(list.kind(), BlockKind::List);
        assert_eq!(list.text(), "a\nb");
    }

    #[test]
    fn test_accordion() {
        let b = ContentBlock::Definition {
            entries: vec![DefinitionEntry::new("A", "x"), DefinitionEntry::new("B", "y")],
        };
        assert!(b.is_accordion());
    }

    #[test]
    fn test_block_serialization_tag() {
        let json = serde_json::to_string(&ContentBlock::paragraph("Hi")).unwrap();
        assert_eq!(json, r#"{"kind":"paragraph","text":"Hi"}"#);

        let tip: ContentBlock =
            serde_json::from_str(r#"{"kind":"tip","label":"Note","text":"Careful"}"#).unwrap();
        assert_eq!(tip.kind(), BlockKind::Tip);
    }
}
