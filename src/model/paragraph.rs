//! Paragraph records as delivered by the document reader.

use serde::{Deserialize, Serialize};

/// One paragraph of the source document.
///
/// Records are produced once by the reader and never mutated; cleanup
/// and classification derive new values from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphRecord {
    /// Paragraph text
    pub text: String,

    /// Style name reported by the reader (e.g. "Heading1", "Normal")
    #[serde(default = "default_style")]
    pub style_hint: String,

    /// Reader already considers this paragraph a heading
    #[serde(default)]
    pub is_heading_hint: bool,

    /// Paragraph carries numbering/bullet properties in the source
    #[serde(default)]
    pub is_list_hint: bool,
}

fn default_style() -> String {
    "Normal".to_string()
}

impl ParagraphRecord {
    /// Create a body paragraph with the default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style_hint: default_style(),
            is_heading_hint: false,
            is_list_hint: false,
        }
    }

    /// Create a paragraph with an explicit style hint.
    pub fn with_style(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            style_hint: style.into(),
            ..Self::new(text)
        }
    }

    /// Create a paragraph flagged as a heading by the reader.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            is_heading_hint: true,
            ..Self::new(text)
        }
    }

    /// Create a paragraph flagged as a list item by the reader.
    pub fn list_item(text: impl Into<String>) -> Self {
        Self {
            is_list_hint: true,
            ..Self::new(text)
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Check if the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Character count of the trimmed text.
    pub fn char_len(&self) -> usize {
        self.trimmed().chars().count()
    }
}

/// Heading/list flags attached to a paragraph by the classifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Paragraph looks like a heading
    pub heading: bool,

    /// Paragraph is a list item
    pub list_item: bool,
}

impl Classification {
    /// The dominant kind; headings win over list items.
    pub fn kind(&self) -> ParagraphKind {
        if self.heading {
            ParagraphKind::Heading
        } else if self.list_item {
            ParagraphKind::ListItem
        } else {
            ParagraphKind::Body
        }
    }
}

/// Coarse paragraph kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphKind {
    /// Heading of any level
    Heading,
    /// Numbered or bulleted list entry
    ListItem,
    /// Ordinary body text
    #[default]
    Body,
}
