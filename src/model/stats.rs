//! Statistics collected during structure inference.

use super::{Classification, Outline, ParagraphKind};
use serde::{Deserialize, Serialize};

/// Counts describing one analyzed document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    /// Non-empty paragraphs in the input
    pub paragraph_count: u32,

    /// Paragraphs classified as headings
    pub heading_count: u32,

    /// Paragraphs classified as list items
    pub list_item_count: u32,

    /// Units in the outline (before size normalization)
    pub unit_count: u32,

    /// Units after size normalization
    pub normalized_unit_count: u32,

    /// Sections across all units
    pub section_count: u32,

    /// Subsections across all sections
    pub subsection_count: u32,

    /// Flat numbered chapters
    pub chapter_count: u32,

    /// Unit copies removed by duplicate suppression
    pub suppressed_unit_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl AnalysisStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified paragraph.
    pub fn add_paragraph(&mut self, text: &str, classification: Classification) {
        self.paragraph_count += 1;
        match classification.kind() {
            ParagraphKind::Heading => self.heading_count += 1,
            ParagraphKind::ListItem => self.list_item_count += 1,
            ParagraphKind::Body => {}
        }
        self.count_text(text);
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Record structural counts from a built outline.
    pub fn record_outline(&mut self, outline: &Outline) {
        self.unit_count = outline.units.len() as u32;
        self.section_count = outline.section_count() as u32;
        self.subsection_count = outline.subsection_count() as u32;
        self.chapter_count = outline.chapters.len() as u32;
        self.suppressed_unit_count = outline.suppressed.len() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &AnalysisStats) {
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_item_count += other.list_item_count;
        self.unit_count += other.unit_count;
        self.normalized_unit_count += other.normalized_unit_count;
        self.section_count += other.section_count;
        self.subsection_count += other.subsection_count;
        self.chapter_count += other.chapter_count;
        self.suppressed_unit_count += other.suppressed_unit_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}
