//! Paragraph classification: heading, list item or body.

use super::patterns::{is_all_caps, HEADING_STYLE, STRUCTURAL_KEYWORD};
use super::Thresholds;
use crate::model::{Classification, ParagraphRecord};

/// Labels paragraphs from style hints and text shape.
///
/// Pure and infallible: anything ambiguous is body text.
#[derive(Debug, Clone)]
pub struct ParagraphClassifier {
    heading_max_chars: usize,
}

impl ParagraphClassifier {
    /// Create a classifier using the given thresholds.
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            heading_max_chars: thresholds.heading_max_chars,
        }
    }

    /// Classify one paragraph.
    pub fn classify(&self, record: &ParagraphRecord) -> Classification {
        let text = record.trimmed();
        if text.is_empty() {
            return Classification::default();
        }

        Classification {
            heading: self.is_heading(record, text),
            list_item: record.is_list_hint,
        }
    }

    /// Classify every paragraph, preserving order.
    pub fn classify_all(&self, records: &[ParagraphRecord]) -> Vec<Classification> {
        records.iter().map(|r| self.classify(r)).collect()
    }

    fn is_heading(&self, record: &ParagraphRecord, text: &str) -> bool {
        if has_heading_style(record) {
            return true;
        }

        if STRUCTURAL_KEYWORD.is_match(text) {
            return true;
        }

        text.chars().count() < self.heading_max_chars && is_all_caps(text)
    }
}

impl Default for ParagraphClassifier {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

/// Heading signalled by the source itself (style name or reader flag),
/// independent of text shape.
pub(crate) fn has_heading_style(record: &ParagraphRecord) -> bool {
    record.is_heading_hint || HEADING_STYLE.is_match(record.style_hint.trim())
}
