//! Sections for units that carry no decimal headings.
//!
//! Short numbered or all-caps paragraphs inside a unit open sections. A long
//! unit without any is split into a fixed number of contiguous chunks
//! instead.

use super::even_chunks;
use crate::model::{Section, Table, Unit};
use crate::parser::patterns::{is_all_caps, SECTION_HEADER, UNIT_HEADER};
use crate::parser::Thresholds;

const INTRO_TITLE: &str = "Introduction";
const CONTENT_TITLE: &str = "Content";
const CHUNK_TITLES: [&str; 3] = [
    "Introduction and basic concepts",
    "Content development",
    "Application and further study",
];

/// Infers sections from unit text and fills declared sections with
/// document paragraphs.
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    thresholds: Thresholds,
}

impl SectionBuilder {
    /// Create a builder using the given thresholds.
    pub fn new(thresholds: &Thresholds) -> Self {
        Self {
            thresholds: thresholds.clone(),
        }
    }

    /// Sections of a unit: its own when it has any, inferred otherwise.
    pub fn sections(&self, unit: &Unit) -> Vec<Section> {
        if unit.sections.is_empty() {
            self.infer(unit.number, &unit.content)
        } else {
            unit.sections.clone()
        }
    }

    /// Infer sections from the paragraphs of unit `unit_number`.
    ///
    /// A heading paragraph closes the running section if it has content;
    /// a heading with nothing after it is replaced by the next one. When at
    /// most one section results and the text is long, paragraphs longer
    /// than `section_fragment_min_chars` are chunked evenly instead.
    pub fn infer(&self, unit_number: u32, paragraphs: &[String]) -> Vec<Section> {
        let t = &self.thresholds;
        let paragraphs: Vec<&str> = paragraphs.iter().map(|p| p.trim()).filter(|p| !p.is_empty()).collect();
        if paragraphs.is_empty() {
            return Vec::new();
        }

        let mut found: Vec<(String, Vec<String>)> = Vec::new();
        let mut title = String::new();
        let mut current = Vec::new();
        for &paragraph in &paragraphs {
            match self.heading_title(paragraph) {
                Some(heading) => {
                    if !current.is_empty() {
                        found.push((title_or(&title, INTRO_TITLE), std::mem::take(&mut current)));
                    }
                    title = heading;
                }
                None => current.push(paragraph.to_string()),
            }
        }
        if !current.is_empty() {
            found.push((title_or(&title, CONTENT_TITLE), current));
        }

        let total_chars: usize =
            paragraphs.iter().map(|p| p.chars().count()).sum::<usize>() + (paragraphs.len() - 1) * 2;
        if found.len() <= 1 && total_chars > t.inferred_sections_min_chars {
            let fragments: Vec<String> = paragraphs
                .iter()
                .filter(|p| p.chars().count() > t.section_fragment_min_chars)
                .map(|p| p.to_string())
                .collect();
            if !fragments.is_empty() {
                log::debug!(
                    "Unit {}: no section headings, chunking {} paragraphs",
                    unit_number,
                    fragments.len()
                );
                found = even_chunks(&fragments, t.inferred_section_count)
                    .enumerate()
                    .map(|(i, chunk)| (chunk_title(i), chunk.to_vec()))
                    .collect();
            }
        }

        if found.is_empty() {
            found.push((
                CONTENT_TITLE.to_string(),
                paragraphs.iter().map(|p| p.to_string()).collect(),
            ));
        }

        found
            .into_iter()
            .enumerate()
            .map(|(i, (title, content))| {
                let mut section = Section::new(format!("{}.{}", unit_number, i + 1), title);
                section.content = content;
                section
            })
            .collect()
    }

    /// Build sections from declared titles and fill them from `content`.
    pub fn declared(&self, unit_number: u32, titles: &[String], content: &str) -> Vec<Section> {
        let mut sections: Vec<Section> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Section::new(format!("{}.{}", unit_number, i + 1), title.trim()))
            .collect();
        self.distribute(&mut sections, content);
        sections
    }

    /// Spread the paragraphs of `content` over `sections` in contiguous
    /// chunks of `ceil(paragraphs / sections)`, replacing their content.
    ///
    /// Short paragraphs, all-caps titles and unit headers are skipped.
    /// Sections past the last chunk keep what they had.
    pub fn distribute(&self, sections: &mut [Section], content: &str) {
        let paragraphs: Vec<String> = content
            .split("\n\n")
            .map(str::trim)
            .filter(|p| self.is_distributable(p))
            .map(str::to_string)
            .collect();
        if paragraphs.is_empty() || sections.is_empty() {
            return;
        }

        let parts = sections.len();
        for (section, chunk) in sections.iter_mut().zip(even_chunks(&paragraphs, parts)) {
            section.content = chunk.to_vec();
        }
    }

    fn heading_title(&self, text: &str) -> Option<String> {
        let len = text.chars().count();
        if len >= self.thresholds.structural_heading_max_chars || Table::is_flattened(text) {
            return None;
        }
        if let Some(caps) = SECTION_HEADER.captures(text) {
            return caps.get(3).map(|m| m.as_str().trim().to_string());
        }
        (len < self.thresholds.inferred_heading_max_chars && is_all_caps(text)).then(|| text.to_string())
    }

    fn is_distributable(&self, text: &str) -> bool {
        let t = &self.thresholds;
        let len = text.chars().count();
        len >= t.section_paragraph_min_chars
            && !(len < t.inferred_heading_max_chars && is_all_caps(text))
            && !UNIT_HEADER.is_match(text)
    }
}

impl Default for SectionBuilder {
    fn default() -> Self {
        Self::new(&Thresholds::default())
    }
}

fn title_or(title: &str, default: &str) -> String {
    if title.is_empty() {
        default.to_string()
    } else {
        title.to_string()
    }
}

fn chunk_title(index: usize) -> String {
    CHUNK_TITLES
        .get(index)
        .map(|t| t.to_string())
        .unwrap_or_else(|| format!("Section {}", index + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn long(label: &str) -> String {
        format!("{} con texto suficiente para superar el umbral de fragmentos cortos.", label)
    }

    #[test]
    fn test_numbered_and_caps_headings_open_sections() {
        let sections = SectionBuilder::default().infer(
            2,
            &paragraphs(&[
                "Texto previo de la unidad.",
                "2.1 Conceptos básicos",
                "Un párrafo de conceptos.",
                "HERRAMIENTAS",
                "Un párrafo de herramientas.",
                "Otro párrafo de herramientas.",
            ]),
        );

        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Introduction", "Conceptos básicos", "HERRAMIENTAS"]);
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2.1", "2.2", "2.3"]);
        assert_eq!(sections[2].content.len(), 2);
    }

    #[test]
    fn test_heading_without_content_is_replaced() {
        let sections = SectionBuilder::default().infer(
            1,
            &paragraphs(&["PRIMERO", "SEGUNDO", "Cuerpo.", "1.2 Tercero", "Más cuerpo."]),
        );
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "SEGUNDO");
        assert_eq!(sections[1].title, "Tercero");
    }

    #[test]
    fn test_trailing_content_without_heading() {
        let sections = SectionBuilder::default().infer(1, &paragraphs(&["Solo un párrafo corto."]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content");
        assert_eq!(sections[0].content, vec!["Solo un párrafo corto."]);
    }

    #[test]
    fn test_long_unit_without_headings_is_chunked() {
        let mut texts: Vec<String> = (1..=7).map(|i| long(&format!("Párrafo {}", i))).collect();
        texts.insert(3, "corto".to_string());
        let sections = SectionBuilder::default().infer(4, &texts);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Introduction and basic concepts");
        assert_eq!(sections[2].title, "Application and further study");
        assert_eq!(sections[0].content.len(), 3);
        assert_eq!(sections[2].content.len(), 1);
        assert!(sections.iter().all(|s| !s.content.contains(&"corto".to_string())));
        assert_eq!(sections[1].id, "4.2");
    }

    #[test]
    fn test_only_headings_become_one_section() {
        let sections = SectionBuilder::default().infer(1, &paragraphs(&["UNO", "DOS"]));
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Content");
        assert_eq!(sections[0].content, vec!["UNO", "DOS"]);
        assert!(SectionBuilder::default().infer(1, &[]).is_empty());
    }

    #[test]
    fn test_existing_sections_kept() {
        let mut unit = Unit::new(3, "Redes");
        unit.sections.push(Section::new("3.1", "Cableado"));
        unit.content.push("HERRAMIENTAS".to_string());
        let sections = SectionBuilder::default().sections(&unit);
        assert_eq!(sections, unit.sections);
    }

    #[test]
    fn test_table_paragraph_is_not_a_heading() {
        let sections = SectionBuilder::default().infer(
            1,
            &paragraphs(&["Introducción breve.", "[Table: IP | MAC]\n10.0.0.1 | AA:BB"]),
        );
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content.len(), 2);
    }

    #[test]
    fn test_distribute_over_declared_sections() {
        let content = [
            "UNIDAD DIDÁCTICA 1: Redes".to_string(),
            long("Uno"),
            "TÍTULO SUELTO".to_string(),
            long("Dos"),
            "corto".to_string(),
            long("Tres"),
            long("Cuatro"),
            long("Cinco"),
        ]
        .join("\n\n");
        let titles = paragraphs(&["Primera", "Segunda"]);
        let sections = SectionBuilder::default().declared(1, &titles, &content);

        assert_eq!(sections[0].id, "1.1");
        assert_eq!(sections[0].content, vec![long("Uno"), long("Dos"), long("Tres")]);
        assert_eq!(sections[1].content, vec![long("Cuatro"), long("Cinco")]);
    }

    #[test]
    fn test_distribute_keeps_sections_when_nothing_fits() {
        let mut sections = vec![Section::new("1.1", "A")];
        sections[0].content.push("previo".to_string());
        SectionBuilder::default().distribute(&mut sections, "corto\n\nTÍTULO");
        assert_eq!(sections[0].content, vec!["previo"]);

        let mut sections = vec![Section::new("1.1", "A"), Section::new("1.2", "B"), Section::new("1.3", "C")];
        SectionBuilder::default().distribute(&mut sections, &long("Único"));
        assert_eq!(sections[0].content, vec![long("Único")]);
        assert!(sections[1].content.is_empty());
    }
}
