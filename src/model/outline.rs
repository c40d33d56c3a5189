//! Hierarchical outline types: module, units, sections, subsections.

use serde::{Deserialize, Serialize};

/// The inferred structure of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Module title discovered before the first unit header (may be empty)
    pub module_title: String,

    /// Code from an explicit "MODULE <code>" label, if present
    pub module_code: Option<String>,

    /// First title-like heading anywhere in the document (may be empty)
    pub document_title: String,

    /// Units in document order
    pub units: Vec<Unit>,

    /// Flat "<n>. Title" chapters found anywhere in the document
    pub chapters: Vec<Chapter>,

    /// Paragraphs preceding the first unit header
    pub front_matter: Vec<String>,

    /// Unit copies discarded by duplicate suppression (table of contents)
    pub suppressed: Vec<Unit>,

    /// Number of paragraphs consumed as unit/section/subsection headings
    pub heading_lines: usize,
}

impl Outline {
    /// Create a new empty outline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the outline has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Get the number of units.
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Find a unit by number.
    pub fn unit(&self, number: u32) -> Option<&Unit> {
        self.units.iter().find(|u| u.number == number)
    }

    /// Total number of sections across all units.
    pub fn section_count(&self) -> usize {
        self.units.iter().map(|u| u.sections.len()).sum()
    }

    /// Total number of subsections across all units.
    pub fn subsection_count(&self) -> usize {
        self.units
            .iter()
            .flat_map(|u| &u.sections)
            .map(|s| s.subsections.len())
            .sum()
    }

    /// Paragraphs held in content arrays, front matter and suppressed units.
    ///
    /// Together with [`Outline::heading_lines`] this accounts for every
    /// non-empty input paragraph.
    pub fn content_paragraph_count(&self) -> usize {
        self.front_matter.len()
            + self
                .units
                .iter()
                .chain(&self.suppressed)
                .map(Unit::content_paragraph_count)
                .sum::<usize>()
    }

    /// Best available title: module title, then document title.
    pub fn title(&self) -> Option<&str> {
        [self.module_title.as_str(), self.document_title.as_str()]
            .into_iter()
            .find(|t| !t.trim().is_empty())
    }
}

/// Top-level instructional division.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit number (unique within an outline)
    pub number: u32,

    /// Unit title
    pub title: String,

    /// Paragraphs before the first section
    pub content: Vec<String>,

    /// Sections in document order
    pub sections: Vec<Section>,
}

impl Unit {
    /// Create a unit with no content.
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            content: Vec::new(),
            sections: Vec::new(),
        }
    }

    /// Paragraphs held by this unit and all its descendants.
    pub fn content_paragraph_count(&self) -> usize {
        self.content.len()
            + self
                .sections
                .iter()
                .map(|s| s.content.len() + s.subsections.iter().map(|ss| ss.content.len()).sum::<usize>())
                .sum::<usize>()
    }

    /// Body paragraphs in reading order, with section and subsection
    /// headings re-inserted as "<id> <title>" lines.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut out = self.content.clone();
        for section in &self.sections {
            if let Some(line) = heading_line(&section.id, &section.title) {
                out.push(line);
            }
            out.extend(section.content.iter().cloned());
            for sub in &section.subsections {
                if let Some(line) = heading_line(&sub.id, &sub.title) {
                    out.push(line);
                }
                out.extend(sub.content.iter().cloned());
            }
        }
        out
    }

    /// Flattened unit text, paragraphs separated by blank lines.
    pub fn flatten(&self) -> String {
        self.paragraphs().join("\n\n")
    }
}

fn heading_line(id: &str, title: &str) -> Option<String> {
    if title.trim().is_empty() {
        None
    } else {
        Some(format!("{} {}", id, title))
    }
}

/// Decimal-numbered subdivision of a unit ("4.2").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// "<unit_number>.<n>"
    pub id: String,

    /// Section title (empty for implicit sections)
    pub title: String,

    /// Paragraphs before the first subsection
    pub content: Vec<String>,

    /// Subsections in document order
    pub subsections: Vec<Subsection>,
}

impl Section {
    /// Create a section with no content.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: Vec::new(),
            subsections: Vec::new(),
        }
    }
}

/// Lettered subdivision of a section ("4.2.a").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsection {
    /// "<section id>.<letter>"
    pub id: String,

    /// Subsection title
    pub title: String,

    /// Paragraphs of the subsection
    pub content: Vec<String>,
}

impl Subsection {
    /// Create a subsection with no content.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: Vec::new(),
        }
    }
}

/// Flat "<n>. Title" division, used when no unit headers exist and as the
/// finer-grained source for content redistribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Chapter number as written
    pub number: u32,

    /// Chapter title
    pub title: String,

    /// Paragraphs until the next chapter header
    pub content: Vec<String>,
}

impl Chapter {
    /// Title followed by content paragraphs.
    pub fn paragraphs(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.content.len() + 1);
        out.push(self.title.clone());
        out.extend(self.content.iter().cloned());
        out
    }
}

impl From<Chapter> for Unit {
    fn from(chapter: Chapter) -> Self {
        Unit {
            number: chapter.number,
            title: chapter.title,
            content: chapter.content,
            sections: Vec::new(),
        }
    }
}

/// A unit known only by number and title, declared by an external source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredUnit {
    /// Declared unit number
    pub number: u32,

    /// Declared title
    #[serde(default)]
    pub title: String,

    /// Declared section titles, filled from the matched content
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<String>,
}

impl DeclaredUnit {
    /// Create a declared unit.
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Set the declared section titles.
    pub fn with_sections<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections = titles.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_unit() -> Unit {
        let mut unit = Unit::new(2, "Networks");
        unit.content.push("Intro.".to_string());
        let mut section = Section::new("2.1", "Topologies");
        section.content.push("Star and bus.".to_string());
        let mut sub = Subsection::new("2.1.a", "Star");
        sub.content.push("A central hub.".to_string());
        section.subsections.push(sub);
        unit.sections.push(section);
        unit
    }

    #[test]
    fn test_unit_paragraphs_reinsert_headings() {
        let unit = sample_unit();
        assert_eq!(
            unit.paragraphs(),
            vec![
                "Intro.",
                "2.1 Topologies",
                "Star and bus.",
                "2.1.a Star",
                "A central hub."
            ]
        );
        assert_eq!(unit.content_paragraph_count(), 3);
    }

    #[test]
    fn test_implicit_section_has_no_heading_line() {
        let mut unit = Unit::new(1, "U");
        let mut section = Section::new("1.3", "");
        section.content.push("Body.".to_string());
        unit.sections.push(section);
        assert_eq!(unit.flatten(), "Body.");
    }

    #[test]
    fn test_outline_counts() {
        let mut outline = Outline::new();
        outline.units.push(sample_unit());
        outline.front_matter.push("Cover".to_string());
        outline.suppressed.push(Unit::new(2, "TOC copy"));

        assert_eq!(outline.unit_count(), 1);
        assert_eq!(outline.section_count(), 1);
        assert_eq!(outline.subsection_count(), 1);
        assert_eq!(outline.content_paragraph_count(), 4);
        assert!(outline.unit(2).is_some());
        assert!(outline.unit(9).is_none());
    }

    #[test]
    fn test_outline_title_preference() {
        let mut outline = Outline::new();
        assert_eq!(outline.title(), None);
        outline.document_title = "Document".to_string();
        assert_eq!(outline.title(), Some("Document"));
        outline.module_title = "Module".to_string();
        assert_eq!(outline.title(), Some("Module"));
    }

    #[test]
    fn test_chapter_into_unit() {
        let chapter = Chapter {
            number: 3,
            title: "Security".to_string(),
            content: vec!["Text.".to_string()],
        };
        assert_eq!(chapter.paragraphs(), vec!["Security", "Text."]);
        let unit: Unit = chapter.into();
        assert_eq!(unit.number, 3);
        assert!(unit.sections.is_empty());
    }
}
